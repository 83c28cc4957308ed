//! Record fixtures for tests

use std::path::PathBuf;
use tempfile::TempDir;
use asset_desk::models::{Applicant, FieldValue, VerificationStatus};

/// Applicant with a Mongo-style id and a complete profile
pub fn applicant(id: &str, full_name: &str, status: VerificationStatus) -> Applicant {
    Applicant {
        id: id.to_string(),
        full_name: full_name.to_string(),
        email: format!("{}@example.edu", full_name.to_lowercase().replace(' ', ".")),
        phone_number: "+1 555 0100".to_string(),
        college_name: "State College".to_string(),
        degree: "B.Tech".to_string(),
        year_of_study: Some(FieldValue::Number(3.into())),
        cgpa: Some(FieldValue::Text("8.7".to_string())),
        tech_stack: vec!["Rust".to_string(), "React".to_string()],
        verification_status: status,
    }
}

/// Mongo ObjectId-shaped identifier
pub fn object_id(n: u32) -> String {
    format!("65a1f0c2e4b0{:012x}", n)
}

pub const USERS_CSV: &str = "name,email,department\n\
    Grace Hopper,grace@example.com,Engineering\n\
    Alan Turing,alan@example.com,Research\n";

pub const ASSETS_CSV: &str = "name,asset_tag,category,description,serial_number,purchase_date,status\n\
    Monitor,MON-001,Electronics,27-inch,SNM1,2024-02-01,available\n\
    Desk,DSK-001,Furniture,Standing desk,SND1,2024-02-02,maintenance\n";

/// Write `contents` into a fresh temp dir and return the dir guard with the file path
pub fn write_temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write temp file");
    (dir, path)
}
