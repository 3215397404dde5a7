//! Shared test fixtures for conduit-gen unit tests.

use conduit_define::{InterfaceDescriptor, MethodDescriptor, ParameterDescriptor};

use crate::classify::ClassifiedParam;

/// Classifies parameter descriptors, panicking on malformed metadata.
pub fn classified(params: Vec<ParameterDescriptor>) -> Vec<ClassifiedParam> {
    params
        .iter()
        .map(|param| ClassifiedParam::from_descriptor(param).unwrap())
        .collect()
}

/// The `Orders` interface with a single `GET /{orderId}` method.
pub fn orders_interface() -> InterfaceDescriptor {
    InterfaceDescriptor::new("Orders", "orders-svc")
        .with_base_path("/orders")
        .with_import("crate::orders::*")
        .with_method(
            MethodDescriptor::new("get_order", "GET", "/{orderId}")
                .with_param(ParameterDescriptor::path_variable("orderId", "i64", "orderId"))
                .returning("Order"),
        )
}
