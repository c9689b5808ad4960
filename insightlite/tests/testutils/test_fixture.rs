//! Test fixture for InsightLite integration tests
//!
//! Uses ONLY the public InsightCoordinator API. Every fixture owns a fresh
//! session and a temporary directory for the CSV files it writes.

use super::scripted_model::ScriptedModel;
use insightlite::{Answer, InsightCoordinator, InsightResult, LoadOutcome, QueryResult};
use std::path::PathBuf;
use std::sync::Arc;

/// Four sales over three products.
/// Revenue by product: Cherry 30.0, Apple 7.5, Banana 2.5
pub const SALES_CSV: &str = "Date,Product,Quantity,Price
2024-01-01,Apple,3,1.5
2024-01-02,Banana,5,0.5
2024-01-03,Apple,2,1.5
2024-01-04,Cherry,10,3.0
";

pub const REVENUE_BY_PRODUCT_SQL: &str = "SELECT sales.product, SUM(sales.quantity * sales.price) AS revenue FROM sales GROUP BY sales.product ORDER BY revenue DESC;";

pub struct TestFixture {
    coordinator: InsightCoordinator,
    model: Arc<ScriptedModel>,
    session_id: String,
    temp_dir: tempfile::TempDir,
}

impl TestFixture {
    /// Create a fixture with an empty session
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = tempfile::tempdir()?;
        let model = Arc::new(ScriptedModel::new());
        let coordinator = InsightCoordinator::with_client(model.clone());
        let session_id = coordinator.create_session()?;

        Ok(Self {
            coordinator,
            model,
            session_id,
            temp_dir,
        })
    }

    /// Create a fixture with `sales.csv` already loaded
    pub fn with_sales_data() -> Result<Self, Box<dyn std::error::Error>> {
        let fixture = Self::new()?;
        let outcome = fixture.load("sales.csv", SALES_CSV);
        outcome.result?;
        Ok(fixture)
    }

    pub fn coordinator(&self) -> &InsightCoordinator {
        &self.coordinator
    }

    pub fn model(&self) -> &ScriptedModel {
        &self.model
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Write a file into the fixture's temporary directory
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// Path inside the temporary directory, without creating anything
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write a CSV file and load it into the session
    pub fn load(&self, name: &str, content: &str) -> LoadOutcome {
        let path = self.write_file(name, content);
        self.coordinator
            .load_files(&self.session_id, &[path])
            .expect("Session should exist")
            .remove(0)
    }

    pub fn schema(&self) -> String {
        self.coordinator
            .schema(&self.session_id)
            .expect("Session should exist")
    }

    pub fn ask(&self, question: &str) -> InsightResult<Answer> {
        self.coordinator.ask(&self.session_id, question)
    }

    pub fn query(&self, statement: &str) -> QueryResult {
        self.coordinator
            .execute(&self.session_id, statement)
            .expect("Session should exist")
    }
}
