//! # estate-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, CommentService, DocumentExists, OfferService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
