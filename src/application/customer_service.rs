use crate::domain::errors::DomainError;
use crate::domain::order::{Customer, NewCustomer};
use crate::domain::ports::CustomerRepository;

pub struct CustomerService<R> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_customer(&self, name: String, email: String) -> Result<Customer, DomainError> {
        let customer = self.repo.create(NewCustomer { name, email })?;
        log::info!("customer {} registered", customer.id);
        Ok(customer)
    }
}
