//! Read-only views and predicates over the introspection model.
//!
//! Emitters use these to group declarations (scalars, enums, inputs, objects),
//! to decide which fields resolve directly to a value (leafs), and to split a
//! field's arguments into required and optional ones.
//!
//! Argument requiredness keys off the `NON_NULL` wrapper alone: an argument is
//! required when its type is `NON_NULL`, whether or not it has a default value.

use crate::config::TransformOptions;

use super::{Field, InputValue, Schema, Type, TypeKind, TypeRef};

/// Scalars whose name ends with this suffix are opaque object identifiers.
const ID_SUFFIX: &str = "ID";

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

impl Schema {
    /// Get a type by name. First match wins.
    pub fn get_type(&self, name: &str) -> Option<&Type> {
        self.types.iter().find(|t| t.name == name)
    }

    /// All custom ID scalar types.
    pub fn ids(&self) -> Vec<&Type> {
        self.filter(Type::is_id)
    }

    /// All scalar types that are not IDs.
    pub fn non_id_scalars(&self) -> Vec<&Type> {
        self.filter(|t| t.is_scalar() && !t.is_id())
    }

    pub fn scalars(&self) -> Vec<&Type> {
        self.filter(Type::is_scalar)
    }

    pub fn enums(&self) -> Vec<&Type> {
        self.filter(Type::is_enum)
    }

    pub fn inputs(&self) -> Vec<&Type> {
        self.filter(Type::is_input_object)
    }

    pub fn objects(&self) -> Vec<&Type> {
        self.filter(Type::is_object)
    }

    pub fn interfaces(&self) -> Vec<&Type> {
        self.filter(Type::is_interface)
    }

    fn filter(&self, pred: impl Fn(&Type) -> bool) -> Vec<&Type> {
        self.types.iter().filter(|t| pred(t)).collect()
    }
}

/// The type emitted as the client entry point.
///
/// Matches on the *normalized* name, so on a raw schema this finds the
/// `Query` type when the options map `Query` to `Client`. When a schema has
/// both a `Query` and a literal `Client`, the `Query` type wins.
pub fn root_type<'a>(schema: &'a Schema, options: &TransformOptions) -> Option<&'a Type> {
    schema
        .get_type(&options.root_type)
        .or_else(|| schema.types.iter().find(|t| t.is_root(options)))
}

// ---------------------------------------------------------------------------
// Type
// ---------------------------------------------------------------------------

impl Type {
    /// Is it an ID scalar?
    pub fn is_id(&self) -> bool {
        self.is_scalar() && self.name.ends_with(ID_SUFFIX)
    }

    pub fn is_scalar(&self) -> bool {
        self.kind == TypeKind::Scalar
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    pub fn is_object(&self) -> bool {
        self.kind == TypeKind::Object
    }

    pub fn is_input_object(&self) -> bool {
        self.kind == TypeKind::InputObject
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Is it the root type, once its name has been normalized?
    pub fn is_root(&self, options: &TransformOptions) -> bool {
        options.normalize_name(&self.name) == options.client_name
    }

    /// Get a field by name. First match wins.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields that return a leaf type (scalar or enum).
    pub fn leafs(&self) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.type_ref.is_leaf()).collect()
    }

    /// Leaf fields that can be resolved without passing arguments.
    ///
    /// * `allow_optional_args` — also keep fields whose arguments are all optional.
    /// * `allow_id_return` — also keep fields returning an ID scalar.
    pub fn simple_leafs(&self, allow_optional_args: bool, allow_id_return: bool) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|f| f.type_ref.is_leaf())
            .filter(|f| allow_id_return || !f.type_ref.is_id())
            .filter(|f| !f.has_args() || (allow_optional_args && !f.has_required_args()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

impl Field {
    pub fn has_args(&self) -> bool {
        !self.args.is_empty()
    }

    pub fn has_required_args(&self) -> bool {
        self.args.iter().any(InputValue::is_required)
    }

    pub fn has_optional_args(&self) -> bool {
        self.args.iter().any(|a| !a.is_required())
    }

    /// Arguments wrapped in `NON_NULL`, in declaration order.
    pub fn required_args(&self) -> Vec<&InputValue> {
        self.args.iter().filter(|a| a.is_required()).collect()
    }

    /// Arguments not wrapped in `NON_NULL`, in declaration order.
    pub fn optional_args(&self) -> Vec<&InputValue> {
        self.args.iter().filter(|a| !a.is_required()).collect()
    }

    /// Get an argument by name. First match wins.
    pub fn get_arg(&self, name: &str) -> Option<&InputValue> {
        self.args.iter().find(|a| a.name == name)
    }
}

impl InputValue {
    pub fn is_required(&self) -> bool {
        !self.type_ref.is_optional()
    }
}

// ---------------------------------------------------------------------------
// TypeRef
// ---------------------------------------------------------------------------

impl TypeRef {
    /// Is this type optional? True for anything not wrapped in `NON_NULL`.
    pub fn is_optional(&self) -> bool {
        self.kind != TypeKind::NonNull
    }

    /// Strip one outer `NON_NULL` layer, if present.
    ///
    /// A `NON_NULL` ref with no `ofType` is returned as-is; the parser rejects
    /// such refs, so this only happens on hand-built values.
    pub fn unwrap_non_null(&self) -> &TypeRef {
        match (&self.kind, &self.of_type) {
            (TypeKind::NonNull, Some(inner)) => inner.as_ref(),
            _ => self,
        }
    }

    /// Is it a leaf? Leaf types are scalars and enums: the last step of a
    /// chained call, where the request must execute and return a value.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self.unwrap_non_null().kind,
            TypeKind::Scalar | TypeKind::Enum
        )
    }

    pub fn is_scalar(&self) -> bool {
        self.unwrap_non_null().kind == TypeKind::Scalar
    }

    pub fn is_object(&self) -> bool {
        self.unwrap_non_null().kind == TypeKind::Object
    }

    pub fn is_list(&self) -> bool {
        self.unwrap_non_null().kind == TypeKind::List
    }

    /// Is it an ID scalar?
    pub fn is_id(&self) -> bool {
        let inner = self.unwrap_non_null();
        inner.kind == TypeKind::Scalar
            && inner
                .name
                .as_deref()
                .is_some_and(|name| name.ends_with(ID_SUFFIX))
    }

    /// The innermost named ref, looking through every list and non-null layer.
    pub fn named_type(&self) -> Option<&TypeRef> {
        match (&self.kind, &self.of_type) {
            (kind, Some(inner)) if kind.is_wrapper() => inner.named_type(),
            (kind, _) if kind.is_wrapper() => None,
            _ => Some(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scalar(name: &str) -> TypeRef {
        TypeRef::named(TypeKind::Scalar, name)
    }

    fn arg(name: &str, type_ref: TypeRef) -> InputValue {
        InputValue {
            name: name.to_string(),
            description: None,
            default_value: None,
            type_ref,
        }
    }

    fn field(name: &str, type_ref: TypeRef, args: Vec<InputValue>) -> Field {
        Field {
            name: name.to_string(),
            description: None,
            type_ref,
            args,
            is_deprecated: false,
            deprecation_reason: None,
        }
    }

    fn named_type(kind: TypeKind, name: &str) -> Type {
        Type {
            kind,
            name: name.to_string(),
            description: None,
            fields: Vec::new(),
            input_fields: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    fn names<'a>(fields: impl IntoIterator<Item = &'a Field>) -> Vec<&'a str> {
        fields.into_iter().map(|f| f.name.as_str()).collect()
    }

    fn container() -> Type {
        Type {
            fields: vec![
                field("id", TypeRef::non_null(scalar("ContainerID")), vec![]),
                field("stdout", TypeRef::non_null(scalar("String")), vec![]),
                field(
                    "platform",
                    TypeRef::named(TypeKind::Enum, "Platform"),
                    vec![arg("verbose", scalar("Boolean"))],
                ),
                field(
                    "envVariable",
                    scalar("String"),
                    vec![arg("name", TypeRef::non_null(scalar("String")))],
                ),
                field(
                    "rootfs",
                    TypeRef::non_null(TypeRef::named(TypeKind::Object, "Directory")),
                    vec![],
                ),
                field("labels", TypeRef::list(scalar("String")), vec![]),
            ],
            ..named_type(TypeKind::Object, "Container")
        }
    }

    fn schema() -> Schema {
        Schema {
            types: vec![
                named_type(TypeKind::Scalar, "String"),
                named_type(TypeKind::Scalar, "ContainerID"),
                named_type(TypeKind::Enum, "Platform"),
                named_type(TypeKind::InputObject, "PipelineLabel"),
                container(),
                named_type(TypeKind::Object, "Query"),
                named_type(TypeKind::Interface, "Node"),
            ],
        }
    }

    #[test]
    fn test_get_type() {
        let schema = schema();
        assert_eq!(schema.get_type("Platform").unwrap().kind, TypeKind::Enum);
        assert!(schema.get_type("Missing").is_none());
    }

    #[test]
    fn test_get_type_first_match_wins() {
        let mut schema = schema();
        schema.types.push(named_type(TypeKind::Enum, "String"));
        assert_eq!(schema.get_type("String").unwrap().kind, TypeKind::Scalar);
    }

    #[test]
    fn test_category_filters_preserve_order() {
        let schema = schema();
        let names = |types: Vec<&Type>| types.iter().map(|t| t.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(schema.scalars()), vec!["String", "ContainerID"]);
        assert_eq!(names(schema.enums()), vec!["Platform"]);
        assert_eq!(names(schema.inputs()), vec!["PipelineLabel"]);
        assert_eq!(names(schema.objects()), vec!["Container", "Query"]);
        assert_eq!(names(schema.interfaces()), vec!["Node"]);
        assert_eq!(names(schema.ids()), vec!["ContainerID"]);
        assert_eq!(names(schema.non_id_scalars()), vec!["String"]);
    }

    #[test]
    fn test_is_id() {
        assert!(named_type(TypeKind::Scalar, "ContainerID").is_id());
        assert!(!named_type(TypeKind::Scalar, "String").is_id());
        assert!(!named_type(TypeKind::Object, "FakeID").is_id());

        assert!(TypeRef::non_null(scalar("FileID")).is_id());
        assert!(scalar("ID").is_id());
        assert!(!TypeRef::list(scalar("FileID")).is_id());
        assert!(!TypeRef::named(TypeKind::Enum, "KindID").is_id());
    }

    #[test]
    fn test_is_leaf() {
        assert!(scalar("Int").is_leaf());
        assert!(TypeRef::non_null(TypeRef::named(TypeKind::Enum, "Platform")).is_leaf());
        assert!(!TypeRef::named(TypeKind::Object, "Container").is_leaf());
        assert!(!TypeRef::list(scalar("Int")).is_leaf());
        assert!(!TypeRef::non_null(TypeRef::list(scalar("Int"))).is_leaf());
    }

    #[test]
    fn test_wrapper_predicates() {
        let list = TypeRef::non_null(TypeRef::list(scalar("Int")));
        assert!(list.is_list());
        assert!(!list.is_optional());
        assert!(!list.is_scalar());
        assert!(TypeRef::named(TypeKind::Object, "Container").is_object());
        assert_eq!(list.named_type(), Some(&scalar("Int")));
    }

    #[test]
    fn test_non_null_without_inner_is_not_leaf() {
        let broken = TypeRef {
            kind: TypeKind::NonNull,
            name: None,
            of_type: None,
        };
        assert!(!broken.is_leaf());
        assert_eq!(broken.named_type(), None);
    }

    #[test]
    fn test_leafs() {
        let ty = container();
        assert_eq!(
            names(ty.leafs()),
            vec!["id", "stdout", "platform", "envVariable"]
        );
    }

    #[test]
    fn test_simple_leafs_defaults() {
        let ty = container();
        assert_eq!(names(ty.simple_leafs(false, false)), vec!["stdout"]);
    }

    #[test]
    fn test_simple_leafs_allow_optional_args() {
        let ty = container();
        assert_eq!(names(ty.simple_leafs(true, false)), vec!["stdout", "platform"]);
    }

    #[test]
    fn test_simple_leafs_allow_ids() {
        let ty = container();
        assert_eq!(names(ty.simple_leafs(false, true)), vec!["id", "stdout"]);
        assert_eq!(
            names(ty.simple_leafs(true, true)),
            vec!["id", "stdout", "platform"]
        );
    }

    #[test]
    fn test_argument_partitioning() {
        let f = field(
            "pipeline",
            TypeRef::non_null(TypeRef::named(TypeKind::Object, "Query")),
            vec![
                arg("a", TypeRef::non_null(scalar("String"))),
                arg("b", scalar("String")),
            ],
        );

        let required: Vec<_> = f.required_args().iter().map(|a| a.name.as_str()).collect();
        let optional: Vec<_> = f.optional_args().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(required, vec!["a"]);
        assert_eq!(optional, vec!["b"]);
        assert!(f.has_required_args());
        assert!(f.has_optional_args());
    }

    #[test]
    fn test_default_value_does_not_make_arg_optional() {
        let mut required = arg("name", TypeRef::non_null(scalar("String")));
        required.default_value = Some("\"\"".to_string());
        let f = field("withName", scalar("String"), vec![required]);
        assert!(f.has_required_args());
        assert!(!f.has_optional_args());
    }

    #[test]
    fn test_get_field_and_arg() {
        let ty = container();
        let env = ty.get_field("envVariable").unwrap();
        assert_eq!(env.get_arg("name").unwrap().name, "name");
        assert!(env.get_arg("missing").is_none());
        assert!(ty.get_field("missing").is_none());
    }

    #[test]
    fn test_root_type_uses_normalized_name() {
        let schema = schema();
        let opts = TransformOptions::default();
        assert_eq!(root_type(&schema, &opts).unwrap().name, "Query");
        assert!(schema.get_type("Query").unwrap().is_root(&opts));
        assert!(!schema.get_type("Container").unwrap().is_root(&opts));
    }

    #[test]
    fn test_root_type_prefers_literal_root_over_client() {
        let schema = Schema {
            types: vec![
                named_type(TypeKind::Object, "Client"),
                named_type(TypeKind::Object, "Query"),
            ],
        };
        let opts = TransformOptions::default();
        assert_eq!(root_type(&schema, &opts).unwrap().name, "Query");

        let normalized = Schema {
            types: vec![named_type(TypeKind::Object, "Client")],
        };
        assert_eq!(root_type(&normalized, &opts).unwrap().name, "Client");
    }

    #[test]
    fn test_root_type_missing() {
        let schema = Schema {
            types: vec![named_type(TypeKind::Scalar, "String")],
        };
        assert!(root_type(&schema, &TransformOptions::default()).is_none());
    }
}
