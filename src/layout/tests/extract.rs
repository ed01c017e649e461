use crate::layout::{Column, FieldAccess, LayoutError, SectionRequest, SectionView, extract_section};
use crate::metadata::fixtures::{ACCOUNT_ID, MASTER_ACCOUNT_ID, record_ui};
use crate::metadata::{LayoutMode, LayoutType, MetadataError};

fn account_section(name: &str) -> SectionView {
    let graph = record_ui();
    extract_section(&graph, &SectionRequest::new(ACCOUNT_ID, "Account", name))
        .expect("extraction succeeds")
}

fn labels(view: &SectionView) -> Vec<Vec<String>> {
    view.rows
        .iter()
        .map(|row| row.columns.iter().map(|column| column.label().to_string()).collect())
        .collect()
}

#[test]
fn extracts_rows_in_layout_order() {
    let view = account_section("Account Information");

    assert_eq!(view.title.as_deref(), Some("Account Information"));
    assert_eq!(
        labels(&view),
        vec![
            vec!["Account Name".to_string(), "Account Phone".to_string()],
            vec!["Type".to_string(), String::new()],
            vec!["Account Record Type".to_string(), "Annual Revenue".to_string()],
            vec!["Description".to_string()],
        ]
    );
}

#[test]
fn column_count_matches_items_with_components() {
    let graph = record_ui();
    let sections = graph
        .record_sections(ACCOUNT_ID, "Account", LayoutType::Full, LayoutMode::View)
        .expect("layout");
    let view = account_section("Account Information");

    let expected: usize = sections[0]
        .layout_rows
        .iter()
        .flat_map(|row| row.layout_items.iter())
        .filter(|item| !item.layout_components.is_empty())
        .count();
    assert_eq!(view.columns().count(), expected);
    assert_eq!(view.rows.len(), sections[0].layout_rows.len());
    assert_eq!(view.width(), 2);
}

#[test]
fn classifies_each_column_of_the_section() {
    let view = account_section("Account Information");
    let row = |index: usize| &view.rows[index].columns;

    assert_eq!(row(0)[0].access(), Some(FieldAccess::Editable { required: true }));
    assert_eq!(row(0)[1].field_name.as_deref(), Some("Phone"));
    assert_eq!(row(0)[1].access(), Some(FieldAccess::Editable { required: false }));
    assert_eq!(row(1)[0].access(), Some(FieldAccess::Disabled));
    assert_eq!(row(1)[1], Column::placeholder());
    assert_eq!(row(2)[0].field_value.as_deref(), Some("Business Account"));
    assert_eq!(row(2)[0].access(), Some(FieldAccess::ReadOnly));
    assert_eq!(row(2)[1].access(), Some(FieldAccess::ReadOnly));
    assert_eq!(row(3)[0].access(), Some(FieldAccess::Disabled));
}

#[test]
fn editable_count_matches_editable_columns() {
    for name in [
        "Account Information",
        "Address Information",
        "System Information",
        "Broken Section",
    ] {
        let view = account_section(name);
        assert_eq!(view.editable, view.editable_columns().count(), "{name}");
    }
    assert_eq!(account_section("Account Information").editable, 2);
    assert_eq!(account_section("System Information").editable, 0);
}

#[test]
fn compound_columns_use_parent_even_when_item_is_labelled() {
    let view = account_section("Address Information");
    let columns = &view.rows[0].columns;

    assert_eq!(columns[0].field_name.as_deref(), Some("BillingAddress"));
    assert_eq!(columns[0].field_label.as_deref(), Some("Billing Address"));
    assert_eq!(columns[1].field_name.as_deref(), Some("ShippingAddress"));
    assert_eq!(columns[1].field_label.as_deref(), Some("Shipping Address"));
    assert!(columns[1].disabled);
    assert_eq!(view.editable, 1);
}

#[test]
fn audit_columns_carry_their_date() {
    let view = account_section("System Information");
    let columns = &view.rows[0].columns;

    assert_eq!(columns[0].field_name.as_deref(), Some("CreatedById"));
    assert_eq!(columns[0].field_date.as_deref(), Some("CreatedDate"));
    assert_eq!(columns[1].field_name.as_deref(), Some("LastModifiedById"));
    assert_eq!(columns[1].field_label.as_deref(), Some("Last Modified By"));
    assert_eq!(columns[1].field_date.as_deref(), Some("LastModifiedDate"));
}

#[test]
fn first_section_with_a_heading_wins() {
    let view = account_section("Account Information");
    assert!(view.columns().all(|column| column.label() != "Shadowed"));
}

#[test]
fn absent_or_rowless_sections_are_empty() {
    assert_eq!(account_section("Opportunity Details"), SectionView::empty());
    let rowless = account_section("Empty Section");
    assert_eq!(rowless.title, None);
    assert!(!rowless.is_displayed());
}

#[test]
fn unresolvable_columns_are_skipped() {
    let view = account_section("Broken Section");
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].columns.len(), 1);
    assert_eq!(view.rows[0].columns[0].field_name.as_deref(), Some("Phone"));
    assert!(view.rows[0].columns[0].read_only);
}

#[test]
fn extraction_is_idempotent() {
    let graph = record_ui();
    let request = SectionRequest::new(ACCOUNT_ID, "Account", "Address Information");
    let first = extract_section(&graph, &request).expect("first");
    let second = extract_section(&graph, &request).expect("second");
    assert_eq!(first, second);
}

#[test]
fn records_without_record_type_read_the_master_layout() {
    let graph = record_ui();
    let view = extract_section(
        &graph,
        &SectionRequest::new(MASTER_ACCOUNT_ID, "Account", "Master Details"),
    )
    .expect("master layout");
    assert_eq!(view.title.as_deref(), Some("Master Details"));
    assert_eq!(view.editable, 0);
    assert!(!view.can_edit());
}

#[test]
fn lookup_failures_are_reported() {
    let graph = record_ui();

    let unknown_record = SectionRequest::new("001MISSING", "Account", "Account Information");
    assert!(matches!(
        extract_section(&graph, &unknown_record),
        Err(LayoutError::Metadata(MetadataError::UnknownRecord { .. }))
    ));

    let edit_layout =
        SectionRequest::new(ACCOUNT_ID, "Account", "Account Information").mode(LayoutMode::Edit);
    assert!(matches!(
        extract_section(&graph, &edit_layout),
        Err(LayoutError::Metadata(MetadataError::MissingLayout { .. }))
    ));
}

#[test]
fn view_model_serializes_in_camel_case() {
    let view = account_section("System Information");
    let json = serde_json::to_value(&view).expect("serialize");
    assert_eq!(json["title"], "System Information");
    assert_eq!(json["rows"][0]["columns"][0]["fieldDate"], "CreatedDate");
    assert_eq!(json["rows"][0]["columns"][0]["isField"], true);
    assert!(json["rows"][0]["columns"][0].get("fieldValue").is_none());
}
