#[path = "testutils/mod.rs"]
mod testutils;

use insightlite::{IngestError, Value};
use testutils::test_fixture::{TestFixture, SALES_CSV};

#[test]
fn test_table_and_column_names_are_normalized() {
    let fixture = TestFixture::new().expect("Failed to create fixture");
    let loaded = fixture
        .load("Q1 Sales Data.csv", " Order ID ,Unit Price,Region\n1,2.5,north\n")
        .result
        .expect("File should load");

    assert_eq!(loaded.table, "q1_sales_data");
    assert_eq!(loaded.columns, vec!["order_id", "unit_price", "region"]);
    assert_eq!(fixture.schema(), "q1_sales_data(order_id, unit_price, region)\n");

    let result = fixture.query("SELECT q1_sales_data.unit_price FROM q1_sales_data;");
    assert_eq!(result.value(0, "unit_price"), Some(&Value::Real(2.5)));
}

#[test]
fn test_schema_lists_exactly_the_loaded_relations() {
    let fixture = TestFixture::new().expect("Failed to create fixture");
    let good = fixture.write_file("customers.csv", "Id,Name\n1,Ann\n2,Bo\n");
    let ragged = fixture.write_file("orders.csv", "Id,Total\n1,10\n2,20,oops\n");
    let missing = fixture.path("missing.csv");
    let more = fixture.write_file("Sales.csv", SALES_CSV);

    let outcomes = fixture
        .coordinator()
        .load_files(fixture.session_id(), &[good, ragged, missing, more])
        .unwrap();

    assert_eq!(outcomes.len(), 4);
    assert!(outcomes[0].is_ok());
    match &outcomes[1].result {
        Err(IngestError::Malformed { line, .. }) => assert_eq!(*line, 3),
        other => panic!("Expected a malformed-file error, got {:?}", other),
    }
    assert!(matches!(outcomes[2].result, Err(IngestError::Io { .. })));
    assert!(outcomes[3].is_ok());

    assert_eq!(
        fixture.schema(),
        "customers(id, name)\nsales(date, product, quantity, price)\n"
    );
    assert_eq!(
        fixture.coordinator().relation_names(fixture.session_id()).unwrap(),
        vec!["customers", "sales"]
    );
}

#[test]
fn test_reupload_replaces_relation() {
    let fixture = TestFixture::with_sales_data().expect("Failed to create fixture");
    assert_eq!(fixture.query("SELECT COUNT(*) AS n FROM sales;").value(0, "n"), Some(&Value::Integer(4)));

    let loaded = fixture
        .load("sales.csv", "Product,Units\nKiwi,7\n")
        .result
        .expect("Replacement should load");
    assert_eq!(loaded.rows, 1);

    assert_eq!(fixture.schema(), "sales(product, units)\n");
    let result = fixture.query("SELECT * FROM sales;");
    assert_eq!(result.row_count(), 1);
    assert_eq!(result.columns, vec!["product", "units"]);
    assert_eq!(result.value(0, "product"), Some(&Value::Text("Kiwi".to_string())));
}

#[test]
fn test_inferred_storage_types() {
    let fixture = TestFixture::new().expect("Failed to create fixture");
    fixture
        .load(
            "accounts.csv",
            "Opened,Active,Balance,Visits,Owner\n2024/03/07,true,10.5,3,ann\n2024-03-08,FALSE,,4,bo\n",
        )
        .result
        .expect("File should load");

    let result = fixture.query(
        "SELECT typeof(opened) AS d, typeof(active) AS b, typeof(balance) AS r, typeof(visits) AS i, typeof(owner) AS t FROM accounts LIMIT 1;",
    );
    assert_eq!(result.value(0, "d"), Some(&Value::Text("text".into())));
    assert_eq!(result.value(0, "b"), Some(&Value::Text("integer".into())));
    assert_eq!(result.value(0, "r"), Some(&Value::Text("real".into())));
    assert_eq!(result.value(0, "i"), Some(&Value::Text("integer".into())));
    assert_eq!(result.value(0, "t"), Some(&Value::Text("text".into())));

    let dates = fixture.query("SELECT opened FROM accounts ORDER BY opened;");
    assert_eq!(dates.value(0, "opened"), Some(&Value::Text("2024-03-07".into())));

    let active = fixture.query("SELECT SUM(active) AS n FROM accounts;");
    assert_eq!(active.value(0, "n"), Some(&Value::Integer(1)));

    let nulls = fixture.query("SELECT COUNT(*) AS n FROM accounts WHERE balance IS NULL;");
    assert_eq!(nulls.value(0, "n"), Some(&Value::Integer(1)));
}

#[test]
fn test_empty_and_duplicate_header_files_rejected() {
    let fixture = TestFixture::new().expect("Failed to create fixture");

    assert!(matches!(
        fixture.load("empty.csv", "").result,
        Err(IngestError::Empty(_))
    ));
    assert!(matches!(
        fixture.load("dupes.csv", "Name,name \nx,y\n").result,
        Err(IngestError::DuplicateColumn { .. })
    ));
    assert_eq!(fixture.schema(), "");
}
