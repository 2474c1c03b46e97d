#![allow(non_snake_case)]

use super::*;
use crate::MessageNameConstructor;
use tracing_test::traced_test;

fn request_with_fields() -> MessageDescriptor {
    MessageDescriptor::with_fields(
        "BookListRequest",
        [
            FieldDescriptor::new("uuid", "string", Cardinality::Singular).unwrap(),
            FieldDescriptor::new("title", "string", Cardinality::Optional).unwrap(),
        ],
    )
    .unwrap()
}

fn response() -> MessageDescriptor {
    MessageDescriptor::new("BookListResponse").unwrap()
}

fn names() -> MessageNameConstructor {
    MessageNameConstructor::with_names("BookListRequest", "BookListResponse")
}

fn request_struct_settings() -> GenerationSettings {
    GenerationSettings {
        filter_behavior: FilterAndPaginationBehavior::RequestStructStrict,
        pagination_behavior: FilterAndPaginationBehavior::MetadataAndRequestStruct,
        ..GenerationSettings::default()
    }
}

// FieldInjection construction

#[test]
fn FieldInjection___new___succeeds_with_all_properties() {
    let injection = FieldInjection::new("Custom", "tenant", "string", Cardinality::Optional).unwrap();

    assert_eq!(injection.field_name(), "tenant");
    assert_eq!(injection.field_type(), "string");
    assert_eq!(injection.cardinality(), Cardinality::Optional);
}

#[test]
fn FieldInjection___try_new___reports_first_missing_property() {
    let error = FieldInjection::try_new("Custom", None, None, None).unwrap_err();

    assert_eq!(
        error,
        ConfigurationError::MissingProperty {
            plugin: "Custom".to_string(),
            property: "field_name",
        }
    );
}

#[test]
fn FieldInjection___inject___appends_field_after_existing_ones() {
    let service = ServiceDescriptor::new("BookService", "library");
    let injection = FieldInjection::new("Custom", "tenant", "string", Cardinality::Optional).unwrap();
    let original = request_with_fields();

    let message = injection.inject(&service, original.clone()).unwrap();

    assert_eq!(message.name(), original.name());
    assert_eq!(&message.fields()[..2], original.fields());
    assert_eq!(message.fields()[2].name(), "tenant");
}

#[test]
fn FieldInjection___inject___fails_on_duplicate_field() {
    let service = ServiceDescriptor::new("BookService", "library");
    let injection = FieldInjection::new("Custom", "uuid", "string", Cardinality::Optional).unwrap();

    let error = injection
        .inject(&service, request_with_fields())
        .unwrap_err();

    assert_eq!(error.app_name, "library");
    assert_eq!(error.model_name, "BookListRequest");
    assert!(error.detail.contains("'uuid'"));
}

// AddFieldRequestGenerationPlugin

#[test]
fn AddFieldRequestGenerationPlugin___run___touches_request_only() {
    let service = ServiceDescriptor::new("BookService", "library");
    let plugin = AddFieldRequestGenerationPlugin::new(
        FieldInjection::new("Custom", "tenant", "string", Cardinality::Singular).unwrap(),
    );

    let (request, response) = plugin
        .run(&service, request_with_fields(), response(), &names())
        .unwrap();

    assert_eq!(request.fields().len(), 3);
    assert_eq!(response, self::response());
}

// FilterGenerationPlugin

#[test]
fn FilterGenerationPlugin___service_with_backends___appends_optional_struct_field() {
    let service = ServiceDescriptor::new("BookService", "library")
        .with_filter_backends(["DjangoFilterBackend"]);
    let plugin = FilterGenerationPlugin::new(&request_struct_settings());
    let original = request_with_fields();

    let (request, _) = plugin
        .run(&service, original.clone(), response(), &names())
        .unwrap();

    assert_eq!(request.fields().len(), 3);
    assert_eq!(&request.fields()[..2], original.fields());
    let field = request.fields().last().unwrap();
    assert_eq!(field.name(), "_filters");
    assert_eq!(field.field_type().type_name(), STRUCT_TYPE);
    assert_eq!(field.cardinality(), Cardinality::Optional);
}

#[test]
fn FilterGenerationPlugin___empty_backends_with_global_default___applies() {
    let service =
        ServiceDescriptor::new("BookService", "library").with_filter_backends(Vec::<String>::new());
    let settings = GenerationSettings {
        default_filter_backends: vec!["DjangoFilterBackend".to_string()],
        ..request_struct_settings()
    };
    let plugin = FilterGenerationPlugin::new(&settings);

    assert!(plugin.check_condition(&service, &request_with_fields(), &response(), &names()));
}

#[test]
fn FilterGenerationPlugin___absent_backends_with_global_default___is_inert() {
    let service = ServiceDescriptor::new("BookService", "library");
    let settings = GenerationSettings {
        default_filter_backends: vec!["DjangoFilterBackend".to_string()],
        ..request_struct_settings()
    };
    let plugin = FilterGenerationPlugin::new(&settings);

    assert!(!plugin.check_condition(&service, &request_with_fields(), &response(), &names()));
}

#[test]
#[traced_test]
fn FilterGenerationPlugin___no_backends_anywhere___is_inert_and_logs_reason() {
    let service =
        ServiceDescriptor::new("BookService", "library").with_filter_backends(Vec::<String>::new());
    let plugin = FilterGenerationPlugin::new(&request_struct_settings());
    let original = request_with_fields();

    let (request, _) = plugin
        .run(&service, original.clone(), response(), &names())
        .unwrap();

    assert_eq!(request, original);
    assert!(logs_contain("no filter_backends found on the service"));
}

#[test]
#[traced_test]
fn FilterGenerationPlugin___metadata_strict___is_inert_and_logs_reason() {
    let service = ServiceDescriptor::new("BookService", "library")
        .with_filter_backends(["DjangoFilterBackend"]);
    let plugin = FilterGenerationPlugin::new(&GenerationSettings::default());
    let original = request_with_fields();

    let (request, _) = plugin
        .run(&service, original.clone(), response(), &names())
        .unwrap();

    assert_eq!(request, original);
    assert!(logs_contain("FILTER_BEHAVIOR is METADATA_STRICT"));
}

#[test]
fn FilterGenerationPlugin___existing_filters_field___is_a_generation_error() {
    let service = ServiceDescriptor::new("BookService", "library")
        .with_filter_backends(["DjangoFilterBackend"]);
    let plugin = FilterGenerationPlugin::new(&request_struct_settings());
    let request = MessageDescriptor::with_fields(
        "BookListRequest",
        [FieldDescriptor::new("_filters", "string", Cardinality::Singular).unwrap()],
    )
    .unwrap();

    let result = plugin.run(&service, request, response(), &names());

    assert!(result.is_err());
}

// PaginationGenerationPlugin

#[test]
fn PaginationGenerationPlugin___service_with_class___appends_optional_struct_field() {
    let service = ServiceDescriptor::new("BookService", "library")
        .with_pagination_class("StandardResultsSetPagination");
    let plugin = PaginationGenerationPlugin::new(&request_struct_settings());

    let (request, response) = plugin
        .run(&service, request_with_fields(), response(), &names())
        .unwrap();

    let field = request.fields().last().unwrap();
    assert_eq!(field.name(), "_pagination");
    assert_eq!(field.field_type().type_name(), STRUCT_TYPE);
    assert_eq!(field.cardinality(), Cardinality::Optional);
    assert!(response.fields().is_empty());
}

#[test]
fn PaginationGenerationPlugin___empty_class_with_global_default___applies() {
    let service = ServiceDescriptor::new("BookService", "library").with_pagination_class("");
    let settings = GenerationSettings {
        default_pagination_class: Some("PageNumberPagination".to_string()),
        ..request_struct_settings()
    };
    let plugin = PaginationGenerationPlugin::new(&settings);

    assert!(plugin.check_condition(&service, &request_with_fields(), &response(), &names()));
}

#[test]
#[traced_test]
fn PaginationGenerationPlugin___no_class_anywhere___is_inert_and_logs_reason() {
    let service = ServiceDescriptor::new("BookService", "library");
    let plugin = PaginationGenerationPlugin::new(&request_struct_settings());
    let original = request_with_fields();

    let (request, _) = plugin
        .run(&service, original.clone(), response(), &names())
        .unwrap();

    assert_eq!(request, original);
    assert!(logs_contain("no pagination_class found on the service"));
}

#[test]
#[traced_test]
fn PaginationGenerationPlugin___metadata_strict___is_inert_and_logs_reason() {
    let service = ServiceDescriptor::new("BookService", "library")
        .with_pagination_class("StandardResultsSetPagination");
    let plugin = PaginationGenerationPlugin::new(&GenerationSettings::default());
    let original = request_with_fields();

    let (request, _) = plugin
        .run(&service, original.clone(), response(), &names())
        .unwrap();

    assert_eq!(request, original);
    assert!(logs_contain("PAGINATION_BEHAVIOR is METADATA_STRICT"));
}
