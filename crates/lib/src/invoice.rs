//! # Invoice Schema Registry
//!
//! The ready-made schema set for invoice parsing: invoice number, date,
//! billing address, line items, and totals, composed bottom-up into a root
//! schema covering a whole invoice. Each function builds its schema fresh;
//! callers construct once at startup and reuse the value read-only.

use crate::errors::SchemaError;
use crate::schema::{Field, ObjectSchema};
use serde_json::json;

/// The invoice number, e.g. `INV-23490`.
pub fn invoice_number_schema() -> Result<ObjectSchema, SchemaError> {
    ObjectSchema::builder(
        "invoice_number_extraction",
        "extraction of relevant information from invoice",
    )
    .attribute(
        Field::text(
            "invoice_number",
            "unique number (identifier) of given invoice",
        )?
        .with_examples([
            ("Invoice Number: INV-23490", "INV-23490"),
            ("INVNO-76890", "INVNO-76890"),
            ("Invoice: INV-100021", "INV-100021"),
        ]),
    )
    .build()
}

/// The invoice date.
pub fn invoice_date_schema() -> Result<ObjectSchema, SchemaError> {
    ObjectSchema::builder("date_extraction", "extraction of date from the invoice")
        .attribute(Field::text("date", "invoice date")?.with_examples([
            ("Date: 05/14/23", "05/14/23"),
            ("14/5/23", "14/05/23"),
            ("Invoice: 14/05/2023", "14/5/2023"),
        ]))
        .build()
}

/// A generic postal address. [`billing_address_schema`] derives from this;
/// keep it address-flavoured, not billing-flavoured.
pub fn address_schema() -> Result<ObjectSchema, SchemaError> {
    ObjectSchema::builder("address", "address details")
        .attribute(Field::text(
            "name",
            "the name of person and organization",
        )?)
        .attribute(Field::text(
            "address_line",
            "the local delivery information such as street, building number, PO box, or apartment portion of a postal address",
        )?)
        .attribute(Field::text("city", "the city portion of the address")?)
        .attribute(Field::text(
            "state_province_code",
            "the code for address US states",
        )?)
        .attribute(Field::number(
            "postal_code",
            "the postal code portion of the address",
        )?)
        .many(true)
        .example(
            "James Bond, Bond Industries 5000 Forbes Avenue Pittsburgh, PA 15213",
            json!([{
                "name": "James Bond, Bond Industries",
                "address_line": "Bond Industries 5000 Forbes Avenue",
                "city": "Pittsburgh",
                "state_province_code": "PA",
                "postal_code": "15213",
            }]),
        )
        .example(
            "Kaushik Shakkari 840 Childs Way, Los Angeles, CA 90089",
            json!([{
                "name": "Kaushik Shakkari",
                "address_line": "840 Childs Way",
                "city": "Los Angeles",
                "state_province_code": "CA",
                "postal_code": "90089",
            }]),
        )
        .example(
            "Shakkari Solutions PO Box 1234 Atlanta GA 30033",
            json!([{
                "name": "Shakkari Solutions",
                "address_line": "PO Box 1234",
                "city": "Atlanta",
                "state_province_code": "GA",
                "postal_code": "30033",
            }]),
        )
        .build()
}

/// The address the bill is sent to, derived from [`address_schema`] with
/// only the id and description overridden.
pub fn billing_address_schema() -> Result<ObjectSchema, SchemaError> {
    address_schema()?
        .derive()
        .id("billing_address")
        .description(
            "where the bill for a product or service is sent so it can be paid by the recipient",
        )
        .build()
}

/// One line item per product or service on the bill.
///
/// `count` and `unit_item_price` are declared as numbers: the steering
/// example documents numeric values (2, 1200.00) and downstream arithmetic
/// treats them as such.
pub fn bill_schema() -> Result<ObjectSchema, SchemaError> {
    ObjectSchema::builder("bill", "the details of bill")
        .attribute(Field::text(
            "product_description",
            "the description of the product or service",
        )?)
        .attribute(Field::number(
            "count",
            "number of units bought for the product",
        )?)
        .attribute(Field::number("unit_item_price", "price per unit")?)
        .attribute(Field::text(
            "product_total_price",
            "the total price, which is number of units * unit_price",
        )?)
        .many(true)
        .example(
            "iphone 14 pro black 2 $1200.00 $2400.00",
            json!([{
                "product_description": "iphone 14 pro black",
                "count": 2,
                "unit_item_price": 1200,
                "product_total_price": 2400,
            }]),
        )
        .build()
}

/// Totals, discounts, tax, and delivery charges. Exactly one per invoice.
pub fn total_bill_schema() -> Result<ObjectSchema, SchemaError> {
    ObjectSchema::builder("total_bill", "the details of total amount, discounts and tax")
        .attribute(Field::number(
            "total",
            "the total amount before tax and delivery charges",
        )?)
        .attribute(Field::number(
            "discount_amount",
            "discount amount is total cost * discount %",
        )?)
        .attribute(Field::number(
            "tax_amount",
            "tax amount is tax_percentage * (total - discount_amount). If discount_amount is 0, then its tax_percentage * total",
        )?)
        .attribute(Field::number(
            "delivery_charges",
            "the cost of shipping products",
        )?)
        .attribute(Field::number(
            "final_total",
            "the total price or balance after removing tax, adding delivery and tax from total",
        )?)
        .example(
            "total $100000.00 discount 0% tax 5 percentage delivery cost $100.00 final_total $95100.00",
            json!({
                "total": 100000,
                "discount_amount": 0,
                "tax_amount": 5000,
                "delivery_charges": 100,
                "final_total": 105100,
            }),
        )
        .example(
            "Amount Now Due: $250,000",
            json!({
                "total": 250000,
                "discount_amount": 0,
                "tax_amount": 0,
                "delivery_charges": 0,
                "final_total": 250000,
            }),
        )
        .build()
}

/// The root schema: all invoice sub-schemas combined, in extraction order.
/// Declared `many` since one input may carry several invoices.
pub fn invoice_schema() -> Result<ObjectSchema, SchemaError> {
    ObjectSchema::builder(
        "invoice_information",
        "relevant invoice parsing from raw extracted text",
    )
    .attribute(invoice_number_schema()?)
    .attribute(invoice_date_schema()?)
    .attribute(billing_address_schema()?)
    .attribute(bill_schema()?)
    .attribute(total_bill_schema()?)
    .many(true)
    .build()
}
