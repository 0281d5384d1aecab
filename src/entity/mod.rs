pub mod car_models;
pub mod car_options;
pub mod cars;
pub mod customers;
pub mod employees;
pub mod manufacturers;
pub mod options;
pub mod payments;
pub mod sales;
pub mod test_drives;

pub use car_models::Entity as CarModels;
pub use car_options::Entity as CarOptions;
pub use cars::Entity as Cars;
pub use customers::Entity as Customers;
pub use employees::Entity as Employees;
pub use manufacturers::Entity as Manufacturers;
pub use options::Entity as Options;
pub use payments::Entity as Payments;
pub use sales::Entity as Sales;
pub use test_drives::Entity as TestDrives;
