use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{car_models, cars, customers, employees, manufacturers, options, payments, sales, test_drives},
    models::{
        Car, CarDetails, CarModel, CarModelDetails, CarStatus, Customer, Employee, Manufacturer,
        Payment, PaymentDetails, Sale, SaleDetails, TestDrive, TestDriveDetails, VehicleOption,
    },
    response::{ApiResponse, DeletedRecord, Meta},
    routes::{
        car_models as model_routes, cars as car_routes, customers as customer_routes,
        employees as employee_routes, health, manufacturers as manufacturer_routes,
        options as option_routes, params, payments as payment_routes, sales as sale_routes,
        test_drives as test_drive_routes,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::welcome,
        manufacturer_routes::list_manufacturers,
        manufacturer_routes::get_manufacturer,
        manufacturer_routes::create_manufacturer,
        manufacturer_routes::update_manufacturer,
        manufacturer_routes::delete_manufacturer,
        model_routes::list_models,
        model_routes::get_model,
        model_routes::list_models_by_manufacturer,
        model_routes::create_model,
        model_routes::update_model,
        model_routes::delete_model,
        car_routes::list_cars,
        car_routes::get_car,
        car_routes::list_cars_by_model,
        car_routes::create_car,
        car_routes::update_car,
        car_routes::delete_car,
        option_routes::list_options,
        option_routes::get_option,
        option_routes::create_option,
        option_routes::update_option,
        option_routes::delete_option,
        option_routes::list_car_options,
        option_routes::attach_option,
        option_routes::detach_option,
        customer_routes::list_customers,
        customer_routes::get_customer,
        customer_routes::create_customer,
        customer_routes::update_customer,
        customer_routes::delete_customer,
        customer_routes::list_customer_sales,
        customer_routes::list_customer_test_drives,
        employee_routes::list_employees,
        employee_routes::get_employee,
        employee_routes::create_employee,
        employee_routes::update_employee,
        employee_routes::delete_employee,
        employee_routes::list_employee_sales,
        employee_routes::list_employee_test_drives,
        sale_routes::list_sales,
        sale_routes::get_sale,
        sale_routes::list_sale_payments,
        sale_routes::create_sale,
        sale_routes::update_sale,
        sale_routes::delete_sale,
        payment_routes::list_payments,
        payment_routes::get_payment,
        payment_routes::create_payment,
        payment_routes::update_payment,
        payment_routes::delete_payment,
        test_drive_routes::list_test_drives,
        test_drive_routes::get_test_drive,
        test_drive_routes::list_car_test_drives,
        test_drive_routes::create_test_drive,
        test_drive_routes::update_test_drive,
        test_drive_routes::delete_test_drive
    ),
    components(
        schemas(
            CarStatus,
            Manufacturer,
            CarModel,
            CarModelDetails,
            Car,
            CarDetails,
            VehicleOption,
            Customer,
            Employee,
            Sale,
            SaleDetails,
            Payment,
            PaymentDetails,
            TestDrive,
            TestDriveDetails,
            manufacturers::CreateManufacturerRequest,
            manufacturers::UpdateManufacturerRequest,
            manufacturers::ManufacturerList,
            car_models::CreateCarModelRequest,
            car_models::UpdateCarModelRequest,
            car_models::CarModelList,
            car_models::ManufacturerModelList,
            cars::CreateCarRequest,
            cars::UpdateCarRequest,
            cars::CarList,
            cars::ModelCarList,
            options::CreateOptionRequest,
            options::UpdateOptionRequest,
            options::AttachOptionRequest,
            options::CarOptionLink,
            options::OptionList,
            customers::CreateCustomerRequest,
            customers::UpdateCustomerRequest,
            customers::CustomerList,
            employees::CreateEmployeeRequest,
            employees::UpdateEmployeeRequest,
            employees::EmployeeList,
            sales::SalePaymentRequest,
            sales::CreateSaleRequest,
            sales::UpdateSaleRequest,
            sales::SaleList,
            payments::CreatePaymentRequest,
            payments::UpdatePaymentRequest,
            payments::PaymentList,
            payments::SalePaymentList,
            test_drives::CreateTestDriveRequest,
            test_drives::UpdateTestDriveRequest,
            test_drives::TestDriveList,
            params::Pagination,
            params::CarListQuery,
            health::HealthData,
            health::WelcomeData,
            Meta,
            DeletedRecord,
            ApiResponse<CarDetails>,
            ApiResponse<SaleDetails>,
            ApiResponse<TestDriveDetails>,
            ApiResponse<DeletedRecord>
        )
    ),
    tags(
        (name = "Health", description = "Health check and welcome endpoints"),
        (name = "Manufacturers", description = "Manufacturer endpoints"),
        (name = "Models", description = "Car model endpoints"),
        (name = "Cars", description = "Car inventory endpoints"),
        (name = "Options", description = "Option catalogue and car option endpoints"),
        (name = "Customers", description = "Customer endpoints"),
        (name = "Employees", description = "Employee endpoints"),
        (name = "Sales", description = "Sale endpoints"),
        (name = "Payments", description = "Payment endpoints"),
        (name = "Test drives", description = "Test drive endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_resource_is_documented() {
        let openapi = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/manufacturers/{id}",
            "/api/models/manufacturer/{manufacturer_id}",
            "/api/cars",
            "/api/options/car/{vin}/{option_id}",
            "/api/customers/{id}/test-drives",
            "/api/employees/{id}/sales",
            "/api/sales/{id}/payments",
            "/api/payments/{id}",
            "/api/test-drives/car/{vin}",
        ] {
            assert!(openapi.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
