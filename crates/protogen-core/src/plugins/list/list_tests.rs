#![allow(non_snake_case)]

use super::*;
use crate::{DataShape, FieldType, MessageNameConstructor};
use std::sync::Arc;

fn synthesized(name: &str) -> MessageDescriptor {
    MessageDescriptor::with_fields(
        name,
        [FieldDescriptor::new("uuid", "string", Cardinality::Singular).unwrap()],
    )
    .unwrap()
    .with_comments("Synthesized message")
}

fn shaped(name: &str, shape: DataShape) -> MessageDescriptor {
    synthesized(name)
        .with_comments("Serializer docs")
        .with_data_shape(Arc::new(shape))
}

fn nested(message: &MessageDescriptor) -> &MessageDescriptor {
    message.fields()[0].field_type().as_message().unwrap()
}

// transform_message_to_list

#[test]
fn ListWrapping___transform___nests_original_as_repeated_results() {
    let service = ServiceDescriptor::new("BookService", "library");
    let wrapping = ListWrapping::new(&GenerationSettings::default());

    let list = wrapping
        .transform_message_to_list(&service, synthesized("BookResponse"), "BookListResponse")
        .unwrap();

    assert_eq!(list.name(), "BookListResponse");
    assert_eq!(list.fields().len(), 1);
    let field = &list.fields()[0];
    assert_eq!(field.name(), DEFAULT_LIST_FIELD_NAME);
    assert_eq!(field.cardinality(), Cardinality::Repeated);
    assert_eq!(nested(&list).name(), "BookResponse");
}

#[test]
fn ListWrapping___transform___same_name_is_a_generation_error() {
    let service = ServiceDescriptor::new("BookService", "library");
    let wrapping = ListWrapping::new(&GenerationSettings::default());

    let error = wrapping
        .transform_message_to_list(&service, synthesized("BookListRequest"), "BookListRequest")
        .unwrap_err();

    assert_eq!(error.app_name, "library");
    assert_eq!(error.model_name, "BookListRequest");
    assert!(error.detail.contains("would shadow"));
}

#[test]
fn RequestAndResponseAsListGenerationPlugin___run___shapeless_list_action_fails() {
    let service = ServiceDescriptor::new("BookService", "library");
    let plugin = RequestAndResponseAsListGenerationPlugin::new(&GenerationSettings::default());
    let names = MessageNameConstructor::for_operation("BookService", "List", None, None);

    let result = plugin.run(
        &service,
        synthesized("BookListRequest"),
        synthesized("BookListResponse"),
        &names,
    );

    assert!(result.is_err());
}

#[test]
fn ListWrapping___transform___adds_count_when_pagination_declared() {
    let service = ServiceDescriptor::new("BookService", "library")
        .with_pagination_class("StandardResultsSetPagination");
    let wrapping = ListWrapping::new(&GenerationSettings::default());

    let list = wrapping
        .transform_message_to_list(&service, synthesized("BookResponse"), "BookListResponse")
        .unwrap();

    let count = &list.fields()[1];
    assert_eq!(count.name(), COUNT_FIELD_NAME);
    assert_eq!(count.field_type(), &FieldType::Named("int32".to_string()));
    assert_eq!(count.cardinality(), Cardinality::Singular);
}

#[test]
fn ListWrapping___transform___adds_count_for_declared_but_empty_pagination() {
    let service = ServiceDescriptor::new("BookService", "library").with_pagination_class("");
    let wrapping = ListWrapping::new(&GenerationSettings::default());

    let list = wrapping
        .transform_message_to_list(&service, synthesized("BookResponse"), "BookListResponse")
        .unwrap();

    assert_eq!(list.fields().len(), 2);
}

#[test]
fn ListWrapping___transform___moves_comments_of_synthesized_message() {
    let service = ServiceDescriptor::new("BookService", "library");
    let wrapping = ListWrapping::new(&GenerationSettings::default());

    let list = wrapping
        .transform_message_to_list(&service, synthesized("BookResponse"), "BookListResponse")
        .unwrap();

    assert_eq!(list.comments(), Some("Synthesized message"));
    assert!(nested(&list).comments().is_none());
}

#[test]
fn ListWrapping___transform___keeps_comments_on_shape_backed_message() {
    let service = ServiceDescriptor::new("BookService", "library");
    let wrapping = ListWrapping::new(&GenerationSettings::default());
    let message = shaped("BookResponse", DataShape::new("BookProtoSerializer", "library"));

    let list = wrapping
        .transform_message_to_list(&service, message, "BookListResponse")
        .unwrap();

    assert!(list.comments().is_none());
    assert_eq!(nested(&list).comments(), Some("Serializer docs"));
}

#[test]
fn ListWrapping___transform___uses_shape_list_attr() {
    let service = ServiceDescriptor::new("BookService", "library");
    let wrapping = ListWrapping::new(&GenerationSettings::default()).with_list_field_name("items");
    let message = shaped(
        "BookResponse",
        DataShape::new("BookProtoSerializer", "library").with_message_list_attr("books"),
    );

    let list = wrapping
        .transform_message_to_list(&service, message, "BookListResponse")
        .unwrap();

    assert_eq!(list.fields()[0].name(), "books");
}

#[test]
fn ListWrapping___transform___falls_back_to_configured_name() {
    let service = ServiceDescriptor::new("BookService", "library");
    let wrapping = ListWrapping::new(&GenerationSettings::default()).with_list_field_name("items");
    let message = shaped("BookResponse", DataShape::new("BookProtoSerializer", "library"));

    let list = wrapping
        .transform_message_to_list(&service, message, "BookListResponse")
        .unwrap();

    assert_eq!(wrapping.list_field_name(), "items");
    assert_eq!(list.fields()[0].name(), "items");
}

#[test]
fn ListWrapping___transform___list_attr_named_count_is_a_generation_error() {
    let service = ServiceDescriptor::new("BookService", "library")
        .with_pagination_class("StandardResultsSetPagination");
    let wrapping = ListWrapping::new(&GenerationSettings::default());
    let message = shaped(
        "BookResponse",
        DataShape::new("BookProtoSerializer", "library").with_message_list_attr("count"),
    );

    let error = wrapping
        .transform_message_to_list(&service, message, "BookListResponse")
        .unwrap_err();

    assert_eq!(error.model_name, "BookProtoSerializer");
    assert_eq!(error.app_name, "library");
}

#[test]
fn ListWrapping___separate_read_write_model___leaves_list_unchanged() {
    let service = ServiceDescriptor::new("BookService", "library");
    let settings = GenerationSettings {
        separate_read_write_model: true,
        ..GenerationSettings::default()
    };

    let split = ListWrapping::new(&settings)
        .transform_message_to_list(&service, synthesized("BookResponse"), "BookListResponse")
        .unwrap();
    let plain = ListWrapping::new(&GenerationSettings::default())
        .transform_message_to_list(&service, synthesized("BookResponse"), "BookListResponse")
        .unwrap();

    assert_eq!(split, plain);
}

// Request / response / combined plugins

#[test]
fn RequestAsListGenerationPlugin___run___wraps_request_only() {
    let service = ServiceDescriptor::new("BookService", "library");
    let plugin = RequestAsListGenerationPlugin::new(&GenerationSettings::default());
    let names = MessageNameConstructor::with_names("OrderRequest", "OrderResponse");
    let response = synthesized("OrderResponse");

    let (request, new_response) = plugin
        .run(&service, synthesized("OrderRequest"), response.clone(), &names)
        .unwrap();

    assert_eq!(request.name(), "OrderListRequest");
    assert_eq!(nested(&request).name(), "OrderRequest");
    assert_eq!(new_response, response);
}

#[test]
fn ResponseAsListGenerationPlugin___run___wraps_response_only() {
    let service = ServiceDescriptor::new("BookService", "library");
    let plugin = ResponseAsListGenerationPlugin::new(&GenerationSettings::default());
    let names = MessageNameConstructor::with_names("OrderRequest", "Order");
    let request = synthesized("OrderRequest");

    let (new_request, response) = plugin
        .run(&service, request.clone(), synthesized("OrderResponse"), &names)
        .unwrap();

    assert_eq!(new_request, request);
    assert_eq!(response.name(), "OrderListResponse");
}

#[test]
fn ResponseAsListGenerationPlugin___list_name___does_not_double_list() {
    let plugin = ResponseAsListGenerationPlugin::new(&GenerationSettings::default());
    let names = MessageNameConstructor::with_names("OrderListRequest", "OrderListResponse");

    assert_eq!(plugin.list_name(&names), "OrderListResponse");
}

#[test]
fn RequestAndResponseAsListGenerationPlugin___run___wraps_both_sides() {
    let service = ServiceDescriptor::new("BookService", "library");
    let plugin = RequestAndResponseAsListGenerationPlugin::new(&GenerationSettings::default());
    let names = MessageNameConstructor::with_names("OrderList", "OrderResponse");

    let (request, response) = plugin
        .run(
            &service,
            synthesized("OrderList"),
            synthesized("OrderResponse"),
            &names,
        )
        .unwrap();

    assert_eq!(request.name(), "OrderListRequest");
    assert_eq!(response.name(), "OrderListResponse");
    assert_eq!(request.comments(), Some("Synthesized message"));
    assert_eq!(response.comments(), Some("Synthesized message"));
}

#[test]
fn RequestAndResponseAsListGenerationPlugin___with_list_field_name___applies_to_both_halves() {
    let plugin = RequestAndResponseAsListGenerationPlugin::new(&GenerationSettings::default())
        .with_list_field_name("items");

    assert_eq!(plugin.request_plugin().wrapping().list_field_name(), "items");
    assert_eq!(plugin.response_plugin().wrapping().list_field_name(), "items");
}
