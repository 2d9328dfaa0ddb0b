pub mod appointment_dto;
pub mod appointment_handlers;
pub mod appointment_models;
pub mod appointment_repository;
pub mod appointment_service;

pub use appointment_dto::{CreateAppointmentRequest, UpdateAppointmentRequest};
pub use appointment_handlers::{
    create_appointment, delete_appointment, get_appointment, get_appointments, update_appointment,
};
pub use appointment_models::Appointment;
pub use appointment_repository::AppointmentRepository;
pub use appointment_service::AppointmentService;
