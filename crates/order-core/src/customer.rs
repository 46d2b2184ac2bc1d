//! # Customers
//!
//! Contactable people and the customers who place orders.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Contactable (trait)                                                    │
//! │  └── contact_summary()  default: "{name} | email: .. | phone: .."       │
//! │         ▲                                  ▲                            │
//! │         │ implements                       │ implements, decorates      │
//! │  ┌──────┴───────┐                 ┌────────┴──────────────────────┐     │
//! │  │   Person     │ ◄── composes ── │   Customer                    │     │
//! │  │ name, email, │                 │ customer_id, city, orders     │     │
//! │  │ phone        │                 │ "{name} ({id}) — orders: n —" │     │
//! │  └──────────────┘                 └───────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Customers are handed around as `Rc<Customer>` because every
//! [`Order`] keeps a back-reference to its customer. Contact fields and the
//! order list sit behind `RefCell`, so setters take `&self`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::RegistrationError;
use crate::id::id_or_generate;
use crate::order::Order;
use crate::validation::{validate_email, validate_phone, validate_required, ValidationResult};

/// Shown in place of a missing email or phone.
pub const MISSING_CONTACT: &str = "—";

// =============================================================================
// Contactable
// =============================================================================

/// Something that can be contacted by email or phone.
pub trait Contactable {
    /// Display name.
    fn name(&self) -> String;

    /// Email, if one is on file.
    fn email(&self) -> Option<String>;

    /// Phone number, if one is on file.
    fn phone(&self) -> Option<String>;

    /// One-line contact card.
    fn contact_summary(&self) -> String {
        base_contact_summary(self)
    }
}

/// The base contact line shared by every [`Contactable`].
///
/// Overriding implementations call this and decorate the result.
pub fn base_contact_summary<C: Contactable + ?Sized>(contact: &C) -> String {
    format!(
        "{} | email: {} | phone: {}",
        contact.name(),
        contact.email().as_deref().unwrap_or(MISSING_CONTACT),
        contact.phone().as_deref().unwrap_or(MISSING_CONTACT)
    )
}

// =============================================================================
// Person
// =============================================================================

/// A named person with optional, validated contact details.
///
/// ## Invariant
/// A stored email or phone always matches its pattern. Setters validate
/// before they write, so a rejected value leaves the old one in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: String,
    email: Option<String>,
    phone: Option<String>,
}

impl Person {
    /// Creates a person, validating any supplied email and phone.
    ///
    /// An empty email or phone counts as not given.
    pub fn new(
        name: impl Into<String>,
        email: Option<String>,
        phone: Option<String>,
    ) -> ValidationResult<Self> {
        let name = name.into();
        validate_required("name", &name)?;

        let mut person = Person {
            name,
            email: None,
            phone: None,
        };
        if let Some(email) = email.filter(|e| !e.is_empty()) {
            person.set_email(email)?;
        }
        if let Some(phone) = phone.filter(|p| !p.is_empty()) {
            person.set_phone(phone)?;
        }

        Ok(person)
    }

    /// Replaces the email after validating it.
    pub fn set_email(&mut self, email: impl Into<String>) -> ValidationResult<()> {
        let email = email.into();
        validate_email(&email)?;
        self.email = Some(email);
        Ok(())
    }

    /// Replaces the phone number after validating it.
    pub fn set_phone(&mut self, phone: impl Into<String>) -> ValidationResult<()> {
        let phone = phone.into();
        validate_phone(&phone)?;
        self.phone = Some(phone);
        Ok(())
    }
}

impl Contactable for Person {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn email(&self) -> Option<String> {
        self.email.clone()
    }

    fn phone(&self) -> Option<String> {
        self.phone.clone()
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer of the shop.
#[derive(Debug)]
pub struct Customer {
    contact: RefCell<Person>,
    customer_id: String,
    city: Option<String>,
    orders: RefCell<Vec<Rc<Order>>>,
}

impl Customer {
    /// Creates a customer.
    ///
    /// Email and phone go through the same validators as
    /// [`set_email`](Self::set_email) / [`set_phone`](Self::set_phone);
    /// a failure aborts construction. A missing id is generated.
    ///
    /// ## Example
    /// ```rust
    /// use order_core::Customer;
    ///
    /// let ann = Customer::new("Ann", Some("a@example.com".into()), None, None, None).unwrap();
    /// assert_eq!(ann.total_spent(), 0.0);
    /// assert!(Customer::new("Bob", Some("bob".into()), None, None, None).is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        email: Option<String>,
        phone: Option<String>,
        city: Option<String>,
        customer_id: Option<String>,
    ) -> ValidationResult<Self> {
        let contact = Person::new(name, email, phone)?;

        Ok(Customer {
            contact: RefCell::new(contact),
            customer_id: id_or_generate(customer_id),
            city,
            orders: RefCell::new(Vec::new()),
        })
    }

    /// Customer identifier.
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// City, if known.
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Replaces the email after validating it.
    ///
    /// On failure the previous email (or its absence) is kept.
    pub fn set_email(&self, email: impl Into<String>) -> ValidationResult<()> {
        self.contact.borrow_mut().set_email(email)
    }

    /// Replaces the phone number after validating it.
    ///
    /// On failure the previous phone (or its absence) is kept.
    pub fn set_phone(&self, phone: impl Into<String>) -> ValidationResult<()> {
        self.contact.borrow_mut().set_phone(phone)
    }

    /// Attaches an order to this customer.
    ///
    /// Called by [`Order::new`]. Fails only when the order list is already
    /// borrowed, which cannot happen through this type's public API.
    pub fn add_order(&self, order: Rc<Order>) -> Result<(), RegistrationError> {
        let mut orders = self
            .orders
            .try_borrow_mut()
            .map_err(|_| RegistrationError {
                customer_id: self.customer_id.clone(),
                order_id: order.order_id().to_string(),
            })?;
        orders.push(order);
        Ok(())
    }

    /// Snapshot of the attached orders.
    pub fn orders(&self) -> Vec<Rc<Order>> {
        self.orders.borrow().clone()
    }

    /// Number of attached orders.
    pub fn order_count(&self) -> usize {
        self.orders.borrow().len()
    }

    /// Sum of the totals of all attached orders.
    pub fn total_spent(&self) -> f64 {
        self.orders.borrow().iter().map(|o| o.total_cost()).sum()
    }
}

impl Contactable for Customer {
    fn name(&self) -> String {
        self.contact.borrow().name()
    }

    fn email(&self) -> Option<String> {
        self.contact.borrow().email()
    }

    fn phone(&self) -> Option<String> {
        self.contact.borrow().phone()
    }

    fn contact_summary(&self) -> String {
        format!(
            "{} ({}) — orders: {} — {}",
            self.name(),
            self.customer_id,
            self.order_count(),
            base_contact_summary(self)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn ann() -> Customer {
        Customer::new(
            "Ann",
            Some("a@example.com".to_string()),
            Some("+1234567890".to_string()),
            Some("Riga".to_string()),
            Some("C-1".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_email_assignment_keeps_previous() {
        let customer = ann();
        let err = customer.set_email("not-an-email").unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail("not-an-email".to_string()));
        assert_eq!(customer.email().as_deref(), Some("a@example.com"));
    }

    #[test]
    fn test_invalid_phone_assignment_keeps_absence() {
        let customer = Customer::new("Ivan", None, None, None, None).unwrap();
        assert!(customer.set_phone("abc").is_err());
        assert_eq!(customer.phone(), None);

        customer.set_phone("1234567").unwrap();
        assert_eq!(customer.phone().as_deref(), Some("1234567"));
    }

    #[test]
    fn test_construction_validates_contacts() {
        assert!(matches!(
            Customer::new("Ann", Some("bad".to_string()), None, None, None),
            Err(ValidationError::InvalidEmail(_))
        ));
        assert!(matches!(
            Customer::new("Ann", None, Some("12".to_string()), None, None),
            Err(ValidationError::InvalidPhone(_))
        ));
    }

    #[test]
    fn test_empty_contacts_count_as_absent() {
        let customer =
            Customer::new("Ann", Some(String::new()), Some(String::new()), None, None).unwrap();
        assert_eq!(customer.email(), None);
        assert_eq!(customer.phone(), None);

        assert!(customer.set_email("").is_err());
    }

    #[test]
    fn test_generated_customer_id() {
        let customer = Customer::new("Ann", None, None, None, None).unwrap();
        assert_eq!(customer.customer_id().len(), 32);
    }

    #[test]
    fn test_person_summary() {
        let person = Person::new("Ann", None, Some("+1234567".to_string())).unwrap();
        assert_eq!(
            person.contact_summary(),
            "Ann | email: — | phone: +1234567"
        );
    }

    #[test]
    fn test_customer_summary_decorates_base() {
        let customer = ann();
        let base = base_contact_summary(&customer);
        assert_eq!(base, "Ann | email: a@example.com | phone: +1234567890");
        assert_eq!(
            customer.contact_summary(),
            format!("Ann (C-1) — orders: 0 — {base}")
        );
    }

    #[test]
    fn test_total_spent_without_orders() {
        assert_eq!(ann().total_spent(), 0.0);
        assert!(ann().orders().is_empty());
    }
}
