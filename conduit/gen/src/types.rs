//! Declared-type inspection.
//!
//! Parameter and return types arrive as Rust source text. They are parsed
//! with `syn` and inspected structurally; nothing here resolves paths, so a
//! user type named `Vec` would be treated like `std::vec::Vec`.

use conduit_define::TypeTraits;
use heck::ToShoutySnakeCase;
use syn::{GenericArgument, PathArguments, Type};

const MAP_TYPES: &[&str] = &["HashMap", "BTreeMap", "IndexMap"];

const COLLECTION_TYPES: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "HashSet",
    "BTreeSet",
    "IndexSet",
    "BinaryHeap",
];

const SCALAR_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
    "f32", "f64", "bool", "char", "String", "str", "Cow", "Uuid",
];

/// How a query parameter's value expands into query pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// One pair per entry.
    Map,
    /// One multi-valued key.
    Array,
    /// One pair per element, all under the same key.
    Collection,
    /// A single value; expanded as a bean with one property.
    Scalar,
    /// One pair per declared property.
    Bean,
}

/// A parsed parameter type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    /// The type exactly as declared.
    pub ty: Type,
    /// Whether the declared type is `Option<_>`, possibly behind references.
    pub nullable: bool,
    /// References between the value a guard binds and `inner`: inside the
    /// `Option` for nullable types, around the whole type otherwise.
    pub refs: usize,
    /// The declared type with `Option` and references peeled.
    pub inner: Type,
}

impl DeclaredType {
    /// Parses declared type text.
    ///
    /// ## Errors
    ///
    /// Returns the parser's message if `source` is not a Rust type.
    pub fn parse(source: &str) -> Result<Self, String> {
        let ty = parse_type(source)?;
        let (outer_refs, outer) = count_references(&ty);
        let (nullable, refs, inner) = match extract_option_inner(outer) {
            Some(inner) => {
                let (refs, inner) = count_references(inner);
                (true, refs, inner.clone())
            }
            None => (false, outer_refs, outer.clone()),
        };
        Ok(Self {
            ty,
            nullable,
            refs,
            inner,
        })
    }

    /// Determines the query shape, letting `traits` vouch for user types.
    ///
    /// Map wins over array, array over collection, collection over scalar.
    pub fn shape(&self, traits: TypeTraits) -> Shape {
        if traits.map || is_named(&self.inner, MAP_TYPES) {
            Shape::Map
        } else if traits.array || is_array(&self.inner) {
            Shape::Array
        } else if traits.iterable || is_named(&self.inner, COLLECTION_TYPES) {
            Shape::Collection
        } else if is_named(&self.inner, SCALAR_TYPES) {
            Shape::Scalar
        } else {
            Shape::Bean
        }
    }
}

/// Parses Rust type text.
///
/// ## Errors
///
/// Returns the parser's message if `source` is blank or not a type.
pub fn parse_type(source: &str) -> Result<Type, String> {
    if source.trim().is_empty() {
        return Err("type is blank".to_string());
    }
    syn::parse_str::<Type>(source).map_err(|e| e.to_string())
}

/// Returns the `T` of an `Option<T>`.
pub fn extract_option_inner(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty
        && type_path.qself.is_none()
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == "Option"
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner)) = args.args.first()
    {
        return Some(inner);
    }
    None
}

/// Strips references and grouping parentheses.
pub fn peel_references(ty: &Type) -> &Type {
    count_references(ty).1
}

/// Strips references and grouping parentheses, counting the references.
///
/// ## Examples
///
/// ```
/// use conduit_gen::types::{count_references, parse_type};
///
/// let ty = parse_type("&&(Vec<u8>)").unwrap();
/// let (refs, inner) = count_references(&ty);
/// assert_eq!(refs, 2);
/// assert_eq!(quote::quote!(#inner).to_string(), "Vec < u8 >");
/// ```
pub fn count_references(mut ty: &Type) -> (usize, &Type) {
    let mut refs = 0;
    loop {
        match ty {
            Type::Reference(reference) => {
                refs += 1;
                ty = &reference.elem;
            }
            Type::Paren(paren) => ty = &paren.elem,
            Type::Group(group) => ty = &group.elem,
            _ => return (refs, ty),
        }
    }
}

/// Returns `true` for the unit type `()`.
pub fn is_unit(ty: &Type) -> bool {
    matches!(peel_references(ty), Type::Tuple(tuple) if tuple.elems.is_empty())
}

fn is_named(ty: &Type, names: &[&str]) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| names.iter().any(|name| segment.ident == name)),
        _ => false,
    }
}

fn is_array(ty: &Type) -> bool {
    match ty {
        Type::Array(_) | Type::Slice(_) => true,
        // Box<[T]>
        Type::Path(type_path) => type_path.path.segments.last().is_some_and(|segment| {
            segment.ident == "Box"
                && matches!(
                    &segment.arguments,
                    PathArguments::AngleBracketed(args)
                        if matches!(args.args.first(), Some(GenericArgument::Type(Type::Slice(_))))
                )
        }),
        _ => false,
    }
}

/// Derives the reified token name of a type.
///
/// The last path segment of every type in the tree is flattened in order
/// and joined in SCREAMING_SNAKE case. Module paths, references and
/// lifetimes do not contribute, so `std::vec::Vec<&Order>` and `Vec<Order>`
/// share a token.
///
/// ## Examples
///
/// ```
/// use conduit_gen::types::{parse_type, token_name};
///
/// let name = |src: &str| token_name(&parse_type(src).unwrap());
/// assert_eq!(name("Order"), "ORDER");
/// assert_eq!(name("Vec<Order>"), "VEC_ORDER");
/// assert_eq!(name("HashMap<String, Vec<LineItem>>"), "HASH_MAP_STRING_VEC_LINE_ITEM");
/// assert_eq!(name("()"), "UNIT");
/// ```
pub fn token_name(ty: &Type) -> String {
    let mut words = Vec::new();
    collect_words(ty, &mut words);
    if words.is_empty() {
        return "UNIT".to_string();
    }
    words
        .iter()
        .map(|word| word.to_shouty_snake_case())
        .collect::<Vec<_>>()
        .join("_")
}

fn collect_words(ty: &Type, words: &mut Vec<String>) {
    match ty {
        Type::Path(type_path) => {
            if let Some(segment) = type_path.path.segments.last() {
                words.push(segment.ident.to_string());
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    for arg in &args.args {
                        if let GenericArgument::Type(inner) = arg {
                            collect_words(inner, words);
                        }
                    }
                }
            }
        }
        Type::Reference(reference) => collect_words(&reference.elem, words),
        Type::Paren(paren) => collect_words(&paren.elem, words),
        Type::Group(group) => collect_words(&group.elem, words),
        Type::Array(array) => {
            words.push("Array".to_string());
            collect_words(&array.elem, words);
        }
        Type::Slice(slice) => {
            words.push("Slice".to_string());
            collect_words(&slice.elem, words);
        }
        Type::Tuple(tuple) if tuple.elems.is_empty() => {}
        Type::Tuple(tuple) => {
            words.push("Tuple".to_string());
            for elem in &tuple.elems {
                collect_words(elem, words);
            }
        }
        _ => words.push("Value".to_string()),
    }
}
