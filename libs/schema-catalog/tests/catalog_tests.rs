use expect_test::expect;
use pretty_assertions::assert_eq;
use schema_catalog::*;

fn users_records() -> Vec<ColumnRecord> {
    vec![
        ColumnRecord::new("app", "users", "id", "INT"),
        ColumnRecord::new("app", "users", "name", "VARCHAR").with_max_length(50),
    ]
}

#[test]
fn users_table_is_described() {
    let catalog = build(&users_records());

    let expected = expect![[r#"
        {
          "app": {
            "users": [
              {
                "name": "id",
                "type": "INT()"
              },
              {
                "name": "name",
                "type": "VARCHAR(50)"
              }
            ]
          }
        }"#]];

    expected.assert_eq(&serde_json::to_string_pretty(&catalog).unwrap());
}

#[test]
fn same_table_name_in_two_schemas_gives_two_top_level_keys() {
    let records = vec![
        ColumnRecord::new("app", "users", "id", "int"),
        ColumnRecord::new("app2", "users", "id", "int"),
    ];

    let catalog = build(&records);

    assert_eq!(vec!["app", "app2"], catalog.schemas().collect::<Vec<_>>());
    assert_eq!(1, catalog.schema("app").unwrap().len());
    assert_eq!(1, catalog.schema("app2").unwrap().len());
    assert!(catalog.has_table("app", "users"));
    assert!(catalog.has_table("app2", "users"));
}

#[test]
fn every_record_becomes_exactly_one_descriptor() {
    let records = vec![
        ColumnRecord::new("shop", "orders", "id", "int"),
        ColumnRecord::new("crm", "contacts", "email", "varchar").with_max_length(255),
        ColumnRecord::new("shop", "orders", "total", "decimal"),
        ColumnRecord::new("shop", "items", "sku", "char").with_max_length(12),
        ColumnRecord::new("crm", "contacts", "id", "int"),
    ];

    let catalog = build(&records);

    assert_eq!(records.len(), catalog.column_count());
}

#[test]
fn interleaved_records_keep_per_table_order() {
    let records = vec![
        ColumnRecord::new("shop", "orders", "id", "int"),
        ColumnRecord::new("shop", "items", "sku", "char").with_max_length(12),
        ColumnRecord::new("shop", "orders", "total", "decimal"),
        ColumnRecord::new("shop", "items", "label", "text").with_max_length(65535),
        ColumnRecord::new("shop", "orders", "created_at", "datetime"),
    ];

    let catalog = build(&records);

    let orders = catalog.table("shop", "orders").unwrap();
    assert_eq!(
        vec!["id", "total", "created_at"],
        orders.column_names().collect::<Vec<_>>()
    );

    let items = catalog.table("shop", "items").unwrap();
    assert_eq!(vec!["sku", "label"], items.column_names().collect::<Vec<_>>());
    assert_eq!("text(65535)", items.column("label").unwrap().tpe);

    assert_eq!(
        vec!["orders", "items"],
        catalog.table_names("shop").collect::<Vec<_>>()
    );
}

#[test]
fn duplicate_columns_are_appended_not_merged() {
    let records = vec![
        ColumnRecord::new("app", "users", "id", "int"),
        ColumnRecord::new("app", "users", "id", "bigint"),
    ];

    let catalog = build(&records);
    let users = catalog.table("app", "users").unwrap();

    assert_eq!(
        &[ColumnDescriptor::new("id", "int()"), ColumnDescriptor::new("id", "bigint()")],
        users.columns()
    );
}

#[test]
fn building_twice_gives_equal_catalogs() {
    let records = users_records();

    assert_eq!(build(&records), build(&records));
}

#[test]
fn build_does_not_consume_the_input() {
    let records = users_records();
    let before = records.clone();

    let _ = build(&records);

    assert_eq!(before, records);
}

#[test]
fn empty_input_gives_no_schema_keys() {
    let records: Vec<ColumnRecord> = Vec::new();
    let catalog = build(&records);

    assert!(catalog.is_empty());
    assert_eq!("{}", serde_json::to_string(&catalog).unwrap());
}

#[test]
fn incremental_builder_matches_build() {
    let records = users_records();
    let mut builder = SchemaCatalogBuilder::new();

    for record in &records {
        builder.push(record);
    }

    assert_eq!(build(&records), builder.finish());
}

#[test]
fn catalog_collects_from_owned_records() {
    let catalog: Catalog = users_records().into_iter().collect();

    let walked: Vec<(&str, &str, usize)> = catalog
        .walk_tables()
        .map(|table| (table.schema(), table.name(), table.columns().len()))
        .collect();

    assert_eq!(vec![("app", "users", 2)], walked);
}

#[test]
fn catalog_deserializes_from_its_json_form() {
    let catalog = build(&users_records());
    let json = serde_json::to_string(&catalog).unwrap();

    let parsed: Catalog = serde_json::from_str(&json).unwrap();

    assert_eq!(catalog, parsed);
}
