//! Declarative macros for reducing boilerplate in calculator definitions.

/// Generates a calculator input struct with the fields shared by every line item.
///
/// This macro generates:
/// - The struct definition with user-defined fields plus `label` and `id`
/// - A `new()` constructor assigning a fresh id
/// - `label()` and `with_id()` setters
/// - private `label_ref()` / `id_ref()` accessors for the `CalculateZakat` impls
///
/// The struct must derive `Default`.
///
/// ```rust,ignore
/// zakat_asset! {
///     #[derive(Debug, Clone, Default)]
///     pub struct MyAsset {
///         pub value: Decimal,
///     }
/// }
/// ```
#[macro_export]
macro_rules! zakat_asset {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
            /// Optional label for identifying this item in portfolio reports.
            pub label: Option<String>,
            /// Stable identifier of the line item. Not part of any result.
            pub id: uuid::Uuid,
        }

        impl $name {
            /// Creates a new instance with default values and a fresh id.
            pub fn new() -> Self {
                Self {
                    id: uuid::Uuid::new_v4(),
                    ..Default::default()
                }
            }

            /// Sets an optional label for this item.
            pub fn label(mut self, val: impl Into<String>) -> Self {
                self.label = Some(val.into());
                self
            }

            /// Restores a known id, e.g. when rebuilding a stored line item.
            pub fn with_id(mut self, id: uuid::Uuid) -> Self {
                self.id = id;
                self
            }

            fn label_ref(&self) -> Option<String> {
                self.label.clone()
            }

            fn id_ref(&self) -> uuid::Uuid {
                self.id
            }
        }
    };
}
