//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! IDs are random UUIDs assigned once, when an entity is created. Cloning or
//! updating an entity keeps its ID, so update and delete by ID keep working
//! against a repository.
//!
//! Catalog data files may leave store and price entry IDs out. Those get
//! name-based (v5) UUIDs instead, so every load of the same file yields the
//! same IDs.

use super::Barcode;

/// Namespace for name-based IDs.
const PRICEMATE_NAMESPACE: ::uuid::Uuid =
    ::uuid::Uuid::from_u128(0x5c1e_0b4e_7f3a_4d2b_9a61_2f0c_8e4d_a713);

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around [`uuid::Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Constructors: `generate()` (random v4), `from_uuid()`
/// - `as_uuid()` accessor and `From` conversions in both directions
///
/// # Example
///
/// ```rust
/// # use pricemate_core::define_id;
/// define_id!(BasketId);
/// define_id!(CouponId);
///
/// let basket_id = BasketId::generate();
/// let coupon_id = CouponId::from_uuid(basket_id.as_uuid());
///
/// // These are different types, so this won't compile:
/// // let _: BasketId = coupon_id;
/// # let _ = coupon_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Generate a fresh random ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(StoreId);
define_id!(PriceEntryId);
define_id!(ShoppingItemId);
define_id!(PriceAlertId);
define_id!(ScanRecordId);

impl StoreId {
    /// ID derived from a store name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let key = name.trim().to_lowercase();
        Self(::uuid::Uuid::new_v5(&PRICEMATE_NAMESPACE, key.as_bytes()))
    }
}

impl PriceEntryId {
    /// ID derived from the product and store an offer belongs to.
    #[must_use]
    pub fn for_offer(barcode: &Barcode, store: StoreId) -> Self {
        let key = format!("{barcode}/{store}");
        Self(::uuid::Uuid::new_v5(&PRICEMATE_NAMESPACE, key.as_bytes()))
    }
}
