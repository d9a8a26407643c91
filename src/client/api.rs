use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::config::Config;
use crate::error::ApiError;
use crate::model::{AttendanceRecord, Department, Employee, Kpi};

/// Read-only client for the HR REST collaborator. The engine never talks to
/// the network itself; callers fetch a snapshot here and hand it over.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "fetching from HR API");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            error!(%status, %url, "HR API returned an error status");
            return Err(ApiError::Status { status, url });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Attendance records for one month. `month` is 1-based.
    pub async fn fetch_attendance(
        &self,
        month: u32,
        year: i32,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.get_json(
            "/api/v1/attendance",
            &[("month", month.to_string()), ("year", year.to_string())],
        )
        .await
    }

    /// KPI records with nested details, optionally narrowed by year and/or
    /// employee.
    pub async fn fetch_kpis(
        &self,
        year: Option<i32>,
        employee_id: Option<u64>,
    ) -> Result<Vec<Kpi>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(year) = year {
            query.push(("year", year.to_string()));
        }
        if let Some(employee_id) = employee_id {
            query.push(("employee_id", employee_id.to_string()));
        }
        self.get_json("/api/v1/kpi", &query).await
    }

    pub async fn fetch_departments(&self) -> Result<Vec<Department>, ApiError> {
        self.get_json("/api/v1/department", &[]).await
    }

    pub async fn fetch_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.get_json("/api/v1/employee", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new(&Config {
            api_base_url: "http://localhost:8080/".to_string(),
            request_timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn attendance_payload_decodes() {
        let body = r#"[
            {"id": 1,
             "employee": {"id": 4, "name": "Budi",
                          "department": [{"id": 1, "name": "Finance"}]},
             "date": "2025-09-03",
             "status": "PRESENT"}
        ]"#;
        let records: Vec<AttendanceRecord> = serde_json::from_str(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee.department.as_ref().unwrap().name, "Finance");
    }
}
