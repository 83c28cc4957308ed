//! Plain-text rendering of the console views

use crate::models::{Applicant, Asset, User};
use crate::state::UserAssetsView;
use crate::utils::helpers::{format_date, format_timestamp, truncate_text};

const MAX_CELL: usize = 40;

/// Left-aligned text table sized to its widest cells
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, cells: Vec<String>) {
        let cells = cells
            .into_iter()
            .map(|cell| truncate_text(&cell, MAX_CELL))
            .collect();
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let mut out = String::new();
        push_line(&mut out, &self.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Assets list; the last column shows which assignment action is offered
pub fn assets_table(assets: &[Asset]) -> String {
    if assets.is_empty() {
        return "No assets found.\n".to_string();
    }
    let mut table = Table::new(&["ID", "Name", "Tag", "Category", "Status", "Assigned To", "Action"]);
    for asset in assets {
        let action = if asset.can_assign() { "assign" } else { "unassign" };
        table.add_row(vec![
            asset.id.to_string(),
            asset.name.clone(),
            asset.asset_tag.clone(),
            asset.category.clone(),
            asset.status.to_string(),
            asset.assignee_name().to_string(),
            action.to_string(),
        ]);
    }
    table.render()
}

/// Users list with the number of assets each one holds
pub fn users_table(users: &[User], assigned_count: impl Fn(i64) -> usize) -> String {
    if users.is_empty() {
        return "No users found.\n".to_string();
    }
    let mut table = Table::new(&["ID", "Name", "Email", "Department", "Assets"]);
    for user in users {
        table.add_row(vec![
            user.id.to_string(),
            user.name.clone(),
            user.email.clone(),
            user.department.clone(),
            assigned_count(user.id).to_string(),
        ]);
    }
    table.render()
}

pub fn user_assets_view(view: &UserAssetsView) -> String {
    let mut out = format!("{}\n\n", view.title());
    if view.assets.is_empty() {
        out.push_str("No assets assigned.\n");
        return out;
    }
    let mut table = Table::new(&["Name", "Tag", "Category", "Status"]);
    for asset in &view.assets {
        table.add_row(vec![
            asset.name.clone(),
            asset.asset_tag.clone(),
            asset.category.clone(),
            asset.status.to_string(),
        ]);
    }
    out.push_str(&table.render());
    out
}

pub fn asset_detail(asset: &Asset) -> String {
    let purchase_date = asset.purchase_date.map(format_date).unwrap_or_default();
    let mut out = format!(
        "{}\n  Tag: {}\n  Category: {}\n  Description: {}\n  Serial: {}\n  Purchased: {}\n  Status: {}\n  Assigned To: {}\n",
        asset.name,
        asset.asset_tag,
        asset.category,
        asset.description,
        asset.serial_number,
        purchase_date,
        asset.status,
        asset.assignee_name(),
    );
    if let Some(assigned_at) = asset.assigned_at {
        out.push_str(&format!("  Assigned At: {}\n", format_timestamp(assigned_at)));
    }
    out
}

pub fn applicants_table(applicants: &[&Applicant]) -> String {
    if applicants.is_empty() {
        return "No applicants.\n".to_string();
    }
    let mut table = Table::new(&["ID", "Name", "Email", "College", "Degree", "Status"]);
    for applicant in applicants {
        table.add_row(vec![
            applicant.id.clone(),
            applicant.full_name.clone(),
            applicant.email.clone(),
            applicant.college_name.clone(),
            applicant.degree.clone(),
            applicant.verification_status.to_string(),
        ]);
    }
    table.render()
}

pub fn applicant_detail(applicant: &Applicant) -> String {
    let year = applicant
        .year_of_study
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let cgpa = applicant.cgpa.as_ref().map(ToString::to_string).unwrap_or_default();
    format!(
        "{}\n  Email: {}\n  Phone: {}\n  Degree: {}\n  Year: {}\n  CGPA: {}\n  Tech Stack: {}\n  Status: {}\n",
        applicant.full_name,
        applicant.email,
        applicant.phone_number,
        applicant.degree,
        year,
        cgpa,
        applicant.tech_stack_display(),
        applicant.verification_status,
    )
}
