// Tax Dashboard - Configuration
// Built once at startup and passed explicitly; nothing is read from the environment

use crate::selection::SelectionKey;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// CSV file re-read on every hover event
    pub data_path: PathBuf,
    /// Neighborhood shown before any hover
    pub default_selection: SelectionKey,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            bind_address: "127.0.0.1:8050".to_string(),
            data_path: PathBuf::from("./data/test.csv"),
            default_selection: SelectionKey::default(),
        }
    }
}
