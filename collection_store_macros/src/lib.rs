mod model;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Model)] derive macro
// ============================================================================

/// Derive macro for the `Model` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Debug, Serialize, Deserialize, Model)]
/// #[serde(rename_all = "camelCase")]
/// #[model(collection = "coins")]
/// pub struct Coin {
///     pub symbol: String,
///     pub name: String,
///     pub current_price_usd: f64,
/// }
///
/// // generated alongside:
/// let changes = CoinPatch::default().current_price_usd(1.01);
/// ```
///
/// - `#[model(collection = "...")]` sets the logical collection name.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[model(patch = "...")]` renames the generated patch struct.
///   If omitted, defaults to the struct name + "Patch".
///
/// The patch struct wraps every field in `Option`, skips `None` fields when
/// serialized, and carries over `rename`/`rename_all` serde attributes so its
/// keys line up with the stored record.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive_model(input)
}
