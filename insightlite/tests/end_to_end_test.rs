#[path = "testutils/mod.rs"]
mod testutils;

use insightlite::{
    ChartPlan, InsightCoordinator, InsightError, ModelConfig, Stage, Value, NO_DATA_MESSAGE,
    SYSTEM_PROMPT,
};
use testutils::test_fixture::{TestFixture, REVENUE_BY_PRODUCT_SQL, SALES_CSV};

#[test]
fn test_total_revenue_by_product() {
    let fixture = TestFixture::new().expect("Failed to create fixture");

    let loaded = fixture
        .load("sales.csv", SALES_CSV)
        .result
        .expect("sales.csv should load");
    assert_eq!(loaded.table, "sales");
    assert_eq!(loaded.columns, vec!["date", "product", "quantity", "price"]);
    assert_eq!(loaded.rows, 4);
    assert_eq!(fixture.schema(), "sales(date, product, quantity, price)\n");

    fixture
        .model()
        .reply(format!("```sql\n{}\n```", REVENUE_BY_PRODUCT_SQL))
        .reply("Cherry clearly drives the business, while bananas contribute little.");

    let answer = fixture
        .ask("what is total revenue by product")
        .expect("Question should be answered");

    assert!(answer.statement.contains("sales.quantity * sales.price"));
    assert!(answer.statement.ends_with(';'));
    assert_eq!(answer.statement.matches(';').count(), 1);

    assert!(!answer.result.is_empty());
    assert!(!answer.result.is_failure());
    assert_eq!(answer.result.columns, vec!["product", "revenue"]);
    assert_eq!(answer.result.row_count(), 3);
    assert_eq!(
        answer.result.value(0, "product"),
        Some(&Value::Text("Cherry".to_string()))
    );
    assert_eq!(answer.result.value(0, "revenue"), Some(&Value::Real(30.0)));
    assert_eq!(answer.result.value(1, "revenue"), Some(&Value::Real(7.5)));

    let narrative = answer.narrative.clone().expect("Narration should succeed");
    assert_ne!(narrative, NO_DATA_MESSAGE);
    assert!(narrative.starts_with("Cherry"));

    assert!(answer.chart().is_ready());
    assert_eq!(
        fixture.coordinator().stage(fixture.session_id()).unwrap(),
        Stage::Done
    );
}

#[test]
fn test_model_sees_schema_question_and_preview() {
    let fixture = TestFixture::with_sales_data().expect("Failed to create fixture");
    fixture
        .model()
        .reply(REVENUE_BY_PRODUCT_SQL)
        .reply("Summary.");

    fixture.ask("what is total revenue by product").unwrap();

    let requests = fixture.model().requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.system == SYSTEM_PROMPT));

    let synthesis = &requests[0].prompt;
    assert!(synthesis.contains("sales(date, product, quantity, price)"));
    assert!(synthesis.contains("what is total revenue by product"));
    assert!(synthesis.contains("quantity * price"));

    let narration = &requests[1].prompt;
    assert!(narration.contains("product"));
    assert!(narration.contains("Cherry"));
    assert!(!narration.contains("SELECT"));
}

#[test]
fn test_last_result_kept_for_export() {
    let fixture = TestFixture::with_sales_data().expect("Failed to create fixture");
    fixture
        .model()
        .reply(REVENUE_BY_PRODUCT_SQL)
        .reply("Summary.");
    fixture.ask("revenue by product").unwrap();

    let last = fixture
        .coordinator()
        .last_result(fixture.session_id())
        .unwrap()
        .expect("A result should be remembered");

    let mut out = Vec::new();
    last.write_csv(&mut out).unwrap();
    let csv = String::from_utf8(out).unwrap();
    assert_eq!(csv.lines().next(), Some("product,revenue"));
    assert!(csv.contains("Cherry,30.0"));

    match ChartPlan::from_result(&last) {
        ChartPlan::Ready(data) => {
            assert_eq!(data.x_column, "product");
            assert_eq!(data.y_column, "revenue");
            assert_eq!(data.labels, vec!["Cherry", "Apple", "Banana"]);
        }
        ChartPlan::NotEnoughData => panic!("Expected chart data"),
    }
}

#[test]
fn test_missing_api_key_fails_at_startup() {
    let config = ModelConfig::default();
    match InsightCoordinator::from_config(&config) {
        Err(InsightError::Config(e)) => assert!(e.to_string().contains("GROQ_API_KEY")),
        Err(other) => panic!("Unexpected error: {}", other),
        Ok(_) => panic!("Coordinator should not start without an API key"),
    }
}
