pub mod car_models;
pub mod cars;
pub mod customers;
pub mod employees;
pub mod manufacturers;
pub mod options;
pub mod payments;
pub mod sales;
pub mod test_drives;
