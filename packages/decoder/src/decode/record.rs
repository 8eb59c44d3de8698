//! Record descriptors: the field-by-field view the engine decodes into.

use crate::config::SKIP_ANNOTATION;
use crate::document::Document;
use crate::error::Result;

/// A value that can be set from a document.
///
/// Implemented for `String`, the integer and floating-point primitives,
/// `Vec<T>` of any decodable `T`, and every record declared with
/// [`record!`](crate::record).
pub trait Decode {
    /// Replace `self` with the value extracted from `document`.
    fn decode(&mut self, document: &dyn Document) -> Result<()>;
}

/// A structured value whose fields carry selector annotations.
///
/// Usually generated by [`record!`](crate::record). Hand-written
/// implementations call `visit` once per field, in declaration order.
pub trait Record {
    /// Hand each field descriptor and its slot to `visit`, stopping at the
    /// first error.
    fn visit_fields(&mut self, visit: &mut FieldVisitor<'_>) -> Result<()>;
}

/// Callback receiving a field descriptor and the slot to decode into.
pub type FieldVisitor<'a> = dyn FnMut(&Field<'_>, &mut dyn Decode) -> Result<()> + 'a;

/// Descriptor of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    name: &'a str,
    annotation: Option<&'a str>,
}

impl<'a> Field<'a> {
    /// Field with a selector annotation.
    #[must_use]
    pub fn new(name: &'a str, annotation: &'a str) -> Self {
        Self {
            name,
            annotation: Some(annotation),
        }
    }

    /// Field without an annotation.
    #[must_use]
    pub fn unannotated(name: &'a str) -> Self {
        Self {
            name,
            annotation: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[must_use]
    pub fn annotation(&self) -> Option<&'a str> {
        self.annotation
    }

    /// The selector to populate this field from, or `None` if the field is
    /// not consumed (no annotation, empty annotation, or `-`).
    #[must_use]
    pub fn selector(&self) -> Option<&'a str> {
        self.annotation
            .filter(|annotation| !annotation.is_empty() && *annotation != SKIP_ANNOTATION)
    }
}

/// Declare a struct whose fields are decoded from document selectors.
///
/// Each field may carry `=> "selector"` after its type. Fields without one,
/// or annotated with `=> "-"`, are left untouched by decoding and need not
/// be decodable. The struct itself implements [`Record`] and [`Decode`], so
/// it can be nested in other records or collected in a `Vec`.
///
/// # Examples
/// ```
/// use markup_decoder::document::HtmlDocument;
/// use markup_decoder::{populate, record};
///
/// record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Product {
///         pub name: String => "h1",
///         pub price: f64 => ".price",
///         pub tags: Vec<String> => "ul.tags li",
///         pub notes: String,
///     }
/// }
///
/// let doc = HtmlDocument::parse(
///     r#"<h1>Lamp</h1><span class="price">$42.50</span>
///        <ul class="tags"><li>light</li><li>desk</li></ul>"#,
/// );
/// let mut product = Product::default();
/// populate(&doc, &mut product).unwrap();
///
/// assert_eq!(product.name, "Lamp");
/// assert_eq!(product.price, 42.5);
/// assert_eq!(product.tags, vec!["light", "desk"]);
/// assert_eq!(product.notes, "");
/// ```
#[macro_export]
macro_rules! record {
    (@visit $self:ident, $visit:ident, $field:ident, "-") => {};
    (@visit $self:ident, $visit:ident, $field:ident, $selector:tt) => {
        $visit(
            &$crate::Field::new(stringify!($field), $selector),
            &mut $self.$field as &mut dyn $crate::Decode,
        )?;
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> $selector:tt)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            #[allow(unused_variables)]
            fn visit_fields(
                &mut self,
                visit: &mut $crate::FieldVisitor<'_>,
            ) -> $crate::Result<()> {
                $($(
                    $crate::record!(@visit self, visit, $field, $selector);
                )?)*
                Ok(())
            }
        }

        impl $crate::Decode for $name {
            fn decode(&mut self, document: &dyn $crate::Document) -> $crate::Result<()> {
                $crate::populate(document, self)
            }
        }
    };
}
