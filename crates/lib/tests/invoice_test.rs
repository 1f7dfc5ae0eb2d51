//! # Invoice Registry Tests
//!
//! Pins the shape and the literal contents of the ready-made invoice
//! schemas: attribute order, many flags, steering examples, and the
//! billing-address derivation.

use anyextract::invoice::{
    address_schema, bill_schema, billing_address_schema, invoice_date_schema,
    invoice_number_schema, invoice_schema, total_bill_schema,
};
use anyextract::{Attribute, ExampleOutput, FieldKind, ObjectSchema};
use serde_json::json;

/// Walks a schema tree and checks that every example's shape agrees with
/// its object's many flag.
fn assert_example_shapes(schema: &ObjectSchema) {
    for example in schema.examples() {
        match (schema.many(), &example.expected) {
            (false, ExampleOutput::One(_)) | (true, ExampleOutput::Many(_)) => {}
            (many, _) => panic!(
                "object {:?} (many: {many}) holds an example of the wrong shape",
                schema.id()
            ),
        }
    }
    for attribute in schema.attributes() {
        if let Attribute::Object(object) = attribute {
            assert_example_shapes(object);
        }
    }
}

#[test]
fn every_registry_example_agrees_with_its_many_flag() {
    assert_example_shapes(&invoice_schema().unwrap());
}

#[test]
fn invoice_number_schema_wraps_a_single_text_field() {
    let schema = invoice_number_schema().unwrap();
    assert_eq!(schema.id(), "invoice_number_extraction");
    assert!(!schema.many());
    assert_eq!(schema.attributes().len(), 1);

    let Some(Attribute::Scalar(field)) = schema.attribute("invoice_number") else {
        panic!("invoice_number should be a scalar attribute");
    };
    assert_eq!(field.kind(), FieldKind::Text);
    assert_eq!(field.examples().len(), 3);
    assert_eq!(field.examples()[0].snippet, "Invoice Number: INV-23490");
    assert_eq!(field.examples()[0].expected, "INV-23490");
}

#[test]
fn date_schema_wraps_a_single_text_field() {
    let schema = invoice_date_schema().unwrap();
    assert_eq!(schema.id(), "date_extraction");
    assert!(!schema.many());

    let Some(Attribute::Scalar(field)) = schema.attribute("date") else {
        panic!("date should be a scalar attribute");
    };
    assert_eq!(field.kind(), FieldKind::Text);
    assert_eq!(field.examples().len(), 3);
}

#[test]
fn billing_address_derives_from_the_address_schema() {
    let address = address_schema().unwrap();
    let billing = billing_address_schema().unwrap();

    // 1. The overridden fields.
    assert_eq!(billing.id(), "billing_address");
    assert_eq!(
        billing.description(),
        "where the bill for a product or service is sent so it can be paid by the recipient"
    );

    // 2. The five address attributes carry over, in order.
    let ids: Vec<&str> = billing.attributes().iter().map(|a| a.id()).collect();
    assert_eq!(
        ids,
        vec!["name", "address_line", "city", "state_province_code", "postal_code"]
    );
    assert_eq!(billing.attributes(), address.attributes());
    assert_eq!(
        billing.attribute("city").map(|a| a.description()),
        Some("the city portion of the address")
    );

    // 3. The three documented examples carry over unchanged.
    assert_eq!(billing.examples().len(), 3);
    assert_eq!(billing.examples(), address.examples());
    assert!(billing.many());
}

#[test]
fn deriving_billing_address_leaves_the_address_schema_unchanged() {
    let address = address_schema().unwrap();
    let before = address.clone();

    let _billing = address
        .derive()
        .id("billing_address")
        .description("where the bill is sent")
        .build()
        .unwrap();

    assert_eq!(address.id(), "address");
    assert_eq!(address.description(), "address details");
    assert_eq!(address, before);
}

#[test]
fn bill_schema_counts_and_prices_are_numbers() {
    let schema = bill_schema().unwrap();
    assert!(schema.many());

    for (id, kind) in [
        ("product_description", FieldKind::Text),
        ("count", FieldKind::Number),
        ("unit_item_price", FieldKind::Number),
        ("product_total_price", FieldKind::Text),
    ] {
        let Some(Attribute::Scalar(field)) = schema.attribute(id) else {
            panic!("{id} should be a scalar attribute");
        };
        assert_eq!(field.kind(), kind, "unexpected kind for {id}");
    }
}

#[test]
fn total_bill_example_mapping_is_stored_unmodified() {
    let schema = total_bill_schema().unwrap();
    assert!(!schema.many());
    assert_eq!(schema.examples().len(), 2);

    let example = &schema.examples()[0];
    assert_eq!(
        example.snippet,
        "total $100000.00 discount 0% tax 5 percentage delivery cost $100.00 final_total $95100.00"
    );
    let expected = ExampleOutput::try_from(json!({
        "total": 100000,
        "discount_amount": 0,
        "tax_amount": 5000,
        "delivery_charges": 100,
        "final_total": 105100,
    }))
    .unwrap();
    assert_eq!(example.expected, expected);
}

#[test]
fn root_schema_composes_the_five_sub_schemas_in_order() {
    let schema = invoice_schema().unwrap();

    assert_eq!(schema.id(), "invoice_information");
    assert!(schema.many(), "one input may carry several invoices");

    let ids: Vec<&str> = schema.attributes().iter().map(|a| a.id()).collect();
    assert_eq!(
        ids,
        vec![
            "invoice_number_extraction",
            "date_extraction",
            "billing_address",
            "bill",
            "total_bill",
        ]
    );
}

#[test]
fn registry_schemas_serialize_for_the_provider() {
    // The provider receives the schema tree as data; it must serialize
    // without losing the ids the output is keyed by.
    let schema = invoice_schema().unwrap();
    let value = serde_json::to_value(&schema).unwrap();

    assert_eq!(value["id"], "invoice_information");
    assert_eq!(value["many"], true);
    assert_eq!(value["attributes"][2]["id"], "billing_address");
    assert_eq!(
        value["attributes"][4]["attributes"][0]["kind"],
        "number"
    );
}
