//! The client's only model: the values currently sitting in the form fields.

use serde::{Deserialize, Serialize};

use crate::config::Flavor;
use crate::model::{Address, AddressPayload, Customer, CustomerPayload};

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct FormState {
    /// Single-slot status line
    #[serde(default)]
    pub flash: String,
    #[serde(default)]
    pub customer: CustomerForm,
    #[serde(default)]
    pub address: AddressForm,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CustomerForm {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub password: String,
    pub email: String,
    pub gender: String,
    pub birthday: String,
    /// `"true"` or `"false"` once filled from a response
    pub is_active: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AddressForm {
    pub customer_id: String,
    pub address_id: String,
    pub address: String,
}

impl FormState {
    pub fn flash(&mut self, message: impl Into<String>) {
        self.flash = message.into();
    }

    pub fn clear_flash(&mut self) {
        self.flash.clear();
    }

    /// Empties both forms and the flash area.
    pub fn clear(&mut self) {
        self.customer = CustomerForm::default();
        self.address = AddressForm::default();
        self.clear_flash();
    }
}

impl CustomerForm {
    /// Overwrites every field with the server's copy.
    pub fn fill(&mut self, customer: &Customer) {
        self.customer_id = customer.customer_id.clone();
        self.first_name = customer.first_name.clone();
        self.last_name = customer.last_name.clone();
        self.nickname = customer.nickname.clone();
        self.password = customer.password.clone().unwrap_or_default();
        self.email = customer.email.clone();
        self.gender = customer.gender.clone();
        self.birthday = customer.birthday.clone();
        self.is_active = customer.is_active.to_string();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        self.is_active == "true"
    }

    pub fn payload(&self, flavor: Flavor) -> CustomerPayload {
        CustomerPayload {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            nickname: self.nickname.clone(),
            password: flavor.sends_password().then(|| self.password.clone()),
            email: self.email.clone(),
            gender: self.gender.clone(),
            birthday: self.birthday.clone(),
            is_active: self.is_active(),
        }
    }
}

impl AddressForm {
    pub fn fill(&mut self, address: &Address) {
        self.customer_id = address.customer_id.clone();
        self.address_id = address.address_id.clone();
        self.address = address.address.clone();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn payload(&self) -> AddressPayload {
        AddressPayload {
            address: self.address.clone(),
        }
    }
}
