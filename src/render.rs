//! Result tables and form views.
//!
//! HTML output goes through maud, so every cell is escaped. Terminal output
//! uses tabled with the same column order.

use maud::{html, Markup};
use tabled::{settings::Style, Table, Tabled};

use crate::form::{AddressForm, CustomerForm};
use crate::model::{Address, Customer};

pub const CUSTOMER_COLUMNS: [&str; 8] = [
    "ID",
    "First Name",
    "Last Name",
    "Nickname",
    "Gender",
    "Email",
    "Birthday",
    "Active",
];

pub const ADDRESS_COLUMNS: [&str; 3] = ["ID", "Address ID", "Address"];

/// Records returned by a search, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsTable {
    Customers(Vec<Customer>),
    Addresses(Vec<Address>),
}

impl ResultsTable {
    pub fn len(&self) -> usize {
        match self {
            ResultsTable::Customers(rows) => rows.len(),
            ResultsTable::Addresses(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn header(&self) -> &'static [&'static str] {
        match self {
            ResultsTable::Customers(_) => &CUSTOMER_COLUMNS,
            ResultsTable::Addresses(_) => &ADDRESS_COLUMNS,
        }
    }

    fn cells(&self) -> Vec<Vec<String>> {
        match self {
            ResultsTable::Customers(rows) => rows.iter().map(customer_cells).collect(),
            ResultsTable::Addresses(rows) => rows.iter().map(address_cells).collect(),
        }
    }

    pub fn to_html(&self) -> Markup {
        let header = self.header();
        let rows = self.cells();
        html! {
            table class="table table-striped" cellpadding="10" {
                thead {
                    tr {
                        @for title in header {
                            th class="col-md-2" { (title) }
                        }
                    }
                }
                tbody {
                    @for (i, row) in rows.iter().enumerate() {
                        tr id=(format!("row_{i}")) {
                            @for cell in row {
                                td { (cell) }
                            }
                        }
                    }
                }
            }
        }
    }

    pub fn to_text(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(self.header().iter().map(|title| title.to_uppercase()));
        for row in self.cells() {
            builder.push_record(row);
        }
        builder.build().with(Style::rounded()).to_string()
    }
}

fn customer_cells(customer: &Customer) -> Vec<String> {
    vec![
        customer.customer_id.clone(),
        customer.first_name.clone(),
        customer.last_name.clone(),
        customer.nickname.clone(),
        customer.gender.clone(),
        customer.email.clone(),
        customer.birthday.clone(),
        customer.is_active.to_string(),
    ]
}

fn address_cells(address: &Address) -> Vec<String> {
    vec![
        address.customer_id.clone(),
        address.address_id.clone(),
        address.address.clone(),
    ]
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "FIELD")]
    field: &'static str,
    #[tabled(rename = "VALUE")]
    value: String,
}

fn field_table(fields: Vec<(&'static str, &str)>) -> String {
    let rows = fields.into_iter().map(|(field, value)| FieldRow {
        field,
        value: value.to_string(),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Customer form as a field/value table. The password is masked.
pub fn customer_form(form: &CustomerForm) -> String {
    let masked = "*".repeat(form.password.chars().count());
    field_table(vec![
        ("customer_id", form.customer_id.as_str()),
        ("first_name", form.first_name.as_str()),
        ("last_name", form.last_name.as_str()),
        ("nickname", form.nickname.as_str()),
        ("password", masked.as_str()),
        ("email", form.email.as_str()),
        ("gender", form.gender.as_str()),
        ("birthday", form.birthday.as_str()),
        ("is_active", form.is_active.as_str()),
    ])
}

pub fn address_form(form: &AddressForm) -> String {
    field_table(vec![
        ("customer_id", form.customer_id.as_str()),
        ("address_id", form.address_id.as_str()),
        ("address", form.address.as_str()),
    ])
}
