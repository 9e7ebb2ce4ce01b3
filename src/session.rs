//! One method per user command.
//!
//! Each command empties the flash area, reads the fields it needs, makes
//! exactly one call and writes the outcome back into the form. Failures are
//! applied to the form first and then returned, so callers can persist the
//! form and still report the error.

use crate::client::{RestClient, Transport};
use crate::config::Flavor;
use crate::error::{ClientError, Result, SERVER_ERROR};
use crate::form::FormState;
use crate::model::Customer;
use crate::query::SearchQuery;
use crate::render::ResultsTable;

pub const SUCCESS: &str = "Success";
pub const CUSTOMER_DELETED: &str = "Customer has been Deleted!";
pub const CUSTOMER_ACTIVATED: &str = "Customer activated";
pub const CUSTOMER_DEACTIVATED: &str = "Customer deactivated";

pub struct Session<'a, T> {
    client: &'a RestClient<T>,
    form: &'a mut FormState,
    flavor: Flavor,
}

impl<'a, T: Transport> Session<'a, T> {
    pub fn new(client: &'a RestClient<T>, form: &'a mut FormState, flavor: Flavor) -> Self {
        Self {
            client,
            form,
            flavor,
        }
    }

    pub fn create_customer(&mut self) -> Result<()> {
        self.form.clear_flash();
        let payload = self.form.customer.payload(self.flavor);
        match self.client.create_customer(&payload) {
            Ok(customer) => {
                self.form.customer.fill(&customer);
                self.form.flash(SUCCESS);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn update_customer(&mut self) -> Result<()> {
        self.form.clear_flash();
        let payload = self.form.customer.payload(self.flavor);
        match self
            .client
            .update_customer(&self.form.customer.customer_id, &payload)
        {
            Ok(customer) => {
                self.form.customer.fill(&customer);
                self.form.flash(SUCCESS);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn retrieve_customer(&mut self) -> Result<()> {
        self.form.clear_flash();
        match self.client.get_customer(&self.form.customer.customer_id) {
            Ok(customer) => {
                self.form.customer.fill(&customer);
                self.form.flash(SUCCESS);
                Ok(())
            }
            Err(e) => {
                self.form.customer.clear();
                self.fail(e)
            }
        }
    }

    pub fn delete_customer(&mut self) -> Result<()> {
        self.form.clear_flash();
        match self.client.delete_customer(&self.form.customer.customer_id) {
            Ok(()) => {
                self.form.customer.clear();
                self.form.flash(CUSTOMER_DELETED);
                Ok(())
            }
            Err(e) => {
                self.form.flash(SERVER_ERROR);
                Err(e)
            }
        }
    }

    /// Searches with the non-empty search fields and copies the top hit into the form.
    pub fn search_customers(&mut self) -> Result<ResultsTable> {
        self.form.clear_flash();
        let query = SearchQuery::from_form(&self.form.customer);
        log::info!("Searching customers with query '{query}'");

        match self.client.search_customers(&query) {
            Ok(customers) => {
                if let Some(first) = customers.first() {
                    self.form.customer.fill(first);
                }
                self.form.flash(SUCCESS);
                Ok(ResultsTable::Customers(customers))
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn activate_customer(&mut self) -> Result<()> {
        self.form.clear_flash();
        let result = self
            .client
            .activate_customer(&self.form.customer.customer_id);
        self.apply_activation(result, CUSTOMER_ACTIVATED)
    }

    pub fn deactivate_customer(&mut self) -> Result<()> {
        self.form.clear_flash();
        let result = self
            .client
            .deactivate_customer(&self.form.customer.customer_id);
        self.apply_activation(result, CUSTOMER_DEACTIVATED)
    }

    pub fn clear(&mut self) {
        self.form.clear();
    }

    pub fn search_addresses(&mut self) -> Result<ResultsTable> {
        self.form.clear_flash();
        match self.client.list_addresses(&self.form.address.customer_id) {
            Ok(addresses) => {
                if let Some(first) = addresses.first() {
                    self.form.address.fill(first);
                }
                Ok(ResultsTable::Addresses(addresses))
            }
            Err(e) => self.fail(e),
        }
    }

    /// Fills only the address text; the ids stay as typed.
    pub fn retrieve_address(&mut self) -> Result<()> {
        self.form.clear_flash();
        let address = &self.form.address;
        match self
            .client
            .get_address(&address.customer_id, &address.address_id)
        {
            Ok(found) => {
                self.form.address.address = found.address;
                Ok(())
            }
            Err(e) => {
                self.form.address.clear();
                self.fail(e)
            }
        }
    }

    pub fn delete_address(&mut self) -> Result<()> {
        self.form.clear_flash();
        let address = &self.form.address;
        match self
            .client
            .delete_address(&address.customer_id, &address.address_id)
        {
            Ok(()) => {
                self.form.address.clear();
                self.form.flash(SUCCESS);
                Ok(())
            }
            Err(e) => {
                self.form.flash(SERVER_ERROR);
                Err(e)
            }
        }
    }

    pub fn create_address(&mut self) -> Result<()> {
        self.form.clear_flash();
        let address = &self.form.address;
        match self
            .client
            .create_address(&address.customer_id, &address.payload())
        {
            Ok(created) => {
                self.form.address.fill(&created);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn update_address(&mut self) -> Result<()> {
        self.form.clear_flash();
        let address = &self.form.address;
        match self.client.update_address(
            &address.customer_id,
            &address.address_id,
            &address.payload(),
        ) {
            Ok(updated) => {
                self.form.address.fill(&updated);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn apply_activation(
        &mut self,
        result: Result<Customer>,
        message: &str,
    ) -> Result<()> {
        match result {
            Ok(customer) => {
                self.form.customer.fill(&customer);
                self.form.flash(message);
                Ok(())
            }
            Err(e) => {
                self.form.customer.clear();
                self.fail(e)
            }
        }
    }

    fn fail<R>(&mut self, error: ClientError) -> Result<R> {
        self.form.flash(error.flash_text());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeTransport;
    use crate::client::Method;
    use crate::form::CustomerForm;

    const JANE: &str = r#"{
        "customer_id": 1, "first_name": "Jane", "last_name": "Doe",
        "nickname": "jd", "password": "hunter2", "email": "jane@example.com",
        "gender": "FEMALE", "birthday": "1990-04-01", "is_active": true
    }"#;

    fn typed_jane() -> CustomerForm {
        CustomerForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            nickname: "jd".to_string(),
            password: "hunter2".to_string(),
            email: "jane@example.com".to_string(),
            gender: "FEMALE".to_string(),
            birthday: "1990-04-01".to_string(),
            is_active: "true".to_string(),
            ..CustomerForm::default()
        }
    }

    fn client(transport: FakeTransport) -> RestClient<FakeTransport> {
        RestClient::new(transport)
    }

    #[test]
    fn create_then_retrieve_round_trips() {
        let client = client(FakeTransport::default().reply(201, JANE).reply(200, JANE));
        let mut form = FormState {
            customer: typed_jane(),
            ..FormState::default()
        };

        Session::new(&client, &mut form, Flavor::Current)
            .create_customer()
            .unwrap();
        let created = form.customer.clone();
        assert_eq!(created.customer_id, "1");
        assert_eq!(form.flash, SUCCESS);

        form.clear();
        form.customer.customer_id = created.customer_id.clone();
        Session::new(&client, &mut form, Flavor::Current)
            .retrieve_customer()
            .unwrap();

        assert_eq!(form.customer, created);
        assert_eq!(client.transport().last().path, "/1");
    }

    #[test]
    fn create_failure_keeps_form_and_flashes_message() {
        let client = client(
            FakeTransport::default().reply(400, r#"{"message": "Invalid CustomerModel: missing email"}"#),
        );
        let mut form = FormState {
            customer: typed_jane(),
            ..FormState::default()
        };

        let err = Session::new(&client, &mut form, Flavor::Current)
            .create_customer()
            .unwrap_err();

        assert!(matches!(err, ClientError::Api { status: 400, .. }));
        assert_eq!(form.flash, "Invalid CustomerModel: missing email");
        assert_eq!(form.customer, typed_jane());
    }

    #[test]
    fn retrieve_failure_clears_form() {
        let client = client(FakeTransport::default().reply(404, r#"{"message": "not found"}"#));
        let mut form = FormState {
            customer: typed_jane(),
            ..FormState::default()
        };
        form.customer.customer_id = "77".to_string();

        assert!(Session::new(&client, &mut form, Flavor::Current)
            .retrieve_customer()
            .is_err());

        assert_eq!(form.flash, "not found");
        assert_eq!(form.customer, CustomerForm::default());
    }

    #[test]
    fn update_uses_form_id() {
        let client = client(FakeTransport::default().reply(200, JANE));
        let mut form = FormState {
            customer: typed_jane(),
            ..FormState::default()
        };
        form.customer.customer_id = "1".to_string();
        form.customer.email = "new@example.com".to_string();

        Session::new(&client, &mut form, Flavor::Legacy)
            .update_customer()
            .unwrap();

        let sent = client.transport().last();
        assert_eq!((sent.method, sent.path.as_str()), (Method::Put, "/1"));
        let body = sent.body.unwrap();
        assert!(body.contains("new@example.com"));
        assert!(!body.contains("password"));
        assert_eq!(form.flash, SUCCESS);
    }

    #[test]
    fn delete_clears_form_and_confirms() {
        let client = client(FakeTransport::default().reply(204, ""));
        let mut form = FormState {
            customer: typed_jane(),
            ..FormState::default()
        };
        form.customer.customer_id = "1".to_string();

        Session::new(&client, &mut form, Flavor::Current)
            .delete_customer()
            .unwrap();

        assert_eq!(form.customer, CustomerForm::default());
        assert_eq!(form.flash, CUSTOMER_DELETED);
    }

    #[test]
    fn delete_failure_is_always_generic() {
        let client = client(FakeTransport::default().reply(404, r#"{"message": "not found"}"#));
        let mut form = FormState::default();
        form.customer.customer_id = "1".to_string();

        assert!(Session::new(&client, &mut form, Flavor::Current)
            .delete_customer()
            .is_err());

        assert_eq!(form.flash, SERVER_ERROR);
        assert_eq!(form.customer.customer_id, "1");
    }

    #[test]
    fn search_fills_form_from_first_row() {
        let body = r#"[
            {"customer_id": 1, "first_name": "Jane", "last_name": "Doe", "is_active": true},
            {"customer_id": 2, "first_name": "Jane", "last_name": "Doe", "is_active": false}
        ]"#;
        let client = client(FakeTransport::default().reply(200, body));
        let mut form = FormState::default();
        form.customer.first_name = "Jane".to_string();
        form.customer.last_name = "Doe".to_string();

        let table = Session::new(&client, &mut form, Flavor::Current)
            .search_customers()
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(form.customer.customer_id, "1");
        assert_eq!(form.customer.is_active, "true");
        assert_eq!(form.flash, SUCCESS);
        assert_eq!(client.transport().last().query.len(), 2);
    }

    #[test]
    fn empty_search_requests_whole_collection() {
        let client = client(FakeTransport::default().reply(200, "[]"));
        let mut form = FormState::default();
        form.customer.customer_id = "5".to_string();

        let table = Session::new(&client, &mut form, Flavor::Current)
            .search_customers()
            .unwrap();

        assert!(table.is_empty());
        let sent = client.transport().last();
        assert_eq!(sent.path, "");
        assert!(sent.query.is_empty());
        assert_eq!(form.customer.customer_id, "5");
    }

    #[test]
    fn activate_then_deactivate_ends_inactive() {
        let client = client(
            FakeTransport::default()
                .reply(200, r#"{"customer_id": 1, "first_name": "Jane", "is_active": true}"#)
                .reply(200, r#"{"customer_id": 1, "first_name": "Jane", "is_active": false}"#),
        );
        let mut form = FormState::default();
        form.customer.customer_id = "1".to_string();

        let mut session = Session::new(&client, &mut form, Flavor::Current);
        session.activate_customer().unwrap();
        assert_eq!(session.form.flash, CUSTOMER_ACTIVATED);
        assert_eq!(session.form.customer.is_active, "true");
        session.deactivate_customer().unwrap();

        assert_eq!(form.customer.is_active, "false");
        assert_eq!(form.flash, CUSTOMER_DEACTIVATED);
        assert_eq!(client.transport().count(), 2);
    }

    #[test]
    fn activation_failure_clears_form() {
        let client = client(FakeTransport::default().reply(404, r#"{"message": "Customer 9 not found"}"#));
        let mut form = FormState {
            customer: typed_jane(),
            ..FormState::default()
        };
        form.customer.customer_id = "9".to_string();

        assert!(Session::new(&client, &mut form, Flavor::Current)
            .deactivate_customer()
            .is_err());

        assert_eq!(form.customer, CustomerForm::default());
        assert_eq!(form.flash, "Customer 9 not found");
    }

    #[test]
    fn clear_resets_any_state() {
        let client = client(FakeTransport::default());
        let mut form = FormState {
            customer: typed_jane(),
            flash: "Success".to_string(),
            ..FormState::default()
        };
        form.address.address = "1 Main St".to_string();

        Session::new(&client, &mut form, Flavor::Current).clear();

        assert_eq!(form, FormState::default());
        assert_eq!(client.transport().count(), 0);
    }

    #[test]
    fn each_command_starts_with_empty_flash() {
        let client = client(FakeTransport::default().reply(500, ""));
        let mut form = FormState::default();
        form.flash = "Success".to_string();
        form.address.customer_id = "1".to_string();

        assert!(Session::new(&client, &mut form, Flavor::Current)
            .search_addresses()
            .is_err());
        assert_eq!(form.flash, SERVER_ERROR);
    }

    #[test]
    fn address_search_fills_address_form() {
        let body = r#"[{"customer_id": 1, "address_id": 4, "address": "1 Main St"},
                       {"customer_id": 1, "address_id": 5, "address": "2 Side Rd"}]"#;
        let client = client(FakeTransport::default().reply(200, body));
        let mut form = FormState::default();
        form.address.customer_id = "1".to_string();

        let table = Session::new(&client, &mut form, Flavor::Current)
            .search_addresses()
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(form.address.address_id, "4");
        assert_eq!(form.address.address, "1 Main St");
        assert_eq!(client.transport().last().path, "/1/addresses");
    }

    #[test]
    fn retrieve_address_fills_text_only() {
        let client = client(
            FakeTransport::default().reply(200, r#"{"customer_id": 1, "address_id": 4, "address": "1 Main St"}"#),
        );
        let mut form = FormState::default();
        form.address.customer_id = "01".to_string();
        form.address.address_id = "4".to_string();

        Session::new(&client, &mut form, Flavor::Current)
            .retrieve_address()
            .unwrap();

        assert_eq!(form.address.customer_id, "01");
        assert_eq!(form.address.address, "1 Main St");
        assert_eq!(client.transport().last().path, "/01/addresses/4");
    }

    #[test]
    fn retrieve_address_failure_clears_address_form() {
        let client = client(FakeTransport::default().reply(404, r#"{"message": "Address not found"}"#));
        let mut form = FormState::default();
        form.customer.customer_id = "1".to_string();
        form.address.customer_id = "1".to_string();
        form.address.address_id = "4".to_string();

        assert!(Session::new(&client, &mut form, Flavor::Current)
            .retrieve_address()
            .is_err());

        assert_eq!(form.address.address_id, "");
        assert_eq!(form.customer.customer_id, "1");
        assert_eq!(form.flash, "Address not found");
    }

    #[test]
    fn delete_address_issues_delete_and_clears() {
        let client = client(FakeTransport::default().reply(204, ""));
        let mut form = FormState::default();
        form.address.customer_id = "1".to_string();
        form.address.address_id = "4".to_string();
        form.address.address = "1 Main St".to_string();

        Session::new(&client, &mut form, Flavor::Current)
            .delete_address()
            .unwrap();

        let sent = client.transport().last();
        assert_eq!((sent.method, sent.path.as_str()), (Method::Delete, "/1/addresses/4"));
        assert_eq!(form.address.address, "");
        assert_eq!(form.flash, SUCCESS);
    }

    #[test]
    fn create_and_update_address_fill_from_response() {
        let client = client(
            FakeTransport::default()
                .reply(201, r#"{"customer_id": 1, "address_id": 6, "address": "1 Main St"}"#)
                .reply(200, r#"{"customer_id": 1, "address_id": 6, "address": "9 Elm St"}"#),
        );
        let mut form = FormState::default();
        form.address.customer_id = "1".to_string();
        form.address.address = "1 Main St".to_string();

        let mut session = Session::new(&client, &mut form, Flavor::Current);
        session.create_address().unwrap();
        assert_eq!(session.form.address.address_id, "6");

        session.form.address.address = "9 Elm St".to_string();
        session.update_address().unwrap();

        let sent = client.transport().last();
        assert_eq!((sent.method, sent.path.as_str()), (Method::Put, "/1/addresses/6"));
        assert_eq!(sent.body.as_deref(), Some(r#"{"address":"9 Elm St"}"#));
        assert_eq!(form.address.address, "9 Elm St");
    }

    #[test]
    fn search_failure_keeps_form() {
        let client = client(FakeTransport::default().reply(400, r#"{"message": "bad query"}"#));
        let mut form = FormState {
            customer: typed_jane(),
            ..FormState::default()
        };

        assert!(Session::new(&client, &mut form, Flavor::Current)
            .search_customers()
            .is_err());

        assert_eq!(form.customer, typed_jane());
        assert_eq!(form.flash, "bad query");
    }

    #[test]
    fn create_address_failure_keeps_address_form() {
        let client = client(FakeTransport::default().reply(404, r#"{"message": "Customer 1 not found"}"#));
        let mut form = FormState::default();
        form.address.customer_id = "1".to_string();
        form.address.address = "1 Main St".to_string();
        let typed = form.address.clone();

        assert!(Session::new(&client, &mut form, Flavor::Current)
            .create_address()
            .is_err());

        assert_eq!(form.address, typed);
        assert_eq!(form.flash, "Customer 1 not found");
    }

    #[test]
    fn update_address_failure_keeps_address_form() {
        let client = client(FakeTransport::default().reply(404, r#"{"message": "Address 6 not found"}"#));
        let mut form = FormState::default();
        form.address.customer_id = "1".to_string();
        form.address.address_id = "6".to_string();
        form.address.address = "9 Elm St".to_string();
        let typed = form.address.clone();

        assert!(Session::new(&client, &mut form, Flavor::Current)
            .update_address()
            .is_err());

        assert_eq!(form.address, typed);
        assert_eq!(form.flash, "Address 6 not found");
    }
}
