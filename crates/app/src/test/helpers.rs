//! Test Helpers

use secrecy::SecretString;

use crate::{
    auth::data::NewUser,
    domain::products::{data::NewProduct, records::Category},
};

pub(crate) fn new_product(name: &str, stock: u32) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        category: Category::Accessories,
        brand: None,
        description: None,
        specs: None,
        price: 1_250,
        stock,
        image: None,
    }
}

pub(crate) fn new_user(email: &str, password: &str, is_admin: bool) -> NewUser {
    NewUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        password: SecretString::from(password),
        is_admin,
    }
}
