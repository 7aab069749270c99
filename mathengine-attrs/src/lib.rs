mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for unit structs and structs with named fields. The information of
/// the error is provided through the `error` attribute:
///
/// ```
/// use mathengine_attrs::ErrorKind;
/// use mathengine_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("unknown function `{}`", name),
///     labels = ["this function"],
///     help = "check the spelling of the function name",
/// )]
/// pub struct UnknownFunction {
///     name: String,
/// }
///
/// let kind = UnknownFunction { name: "sine".to_string() };
/// assert_eq!(kind.message(), "unknown function `sine`");
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                   |
/// | ----------- | ----------------------------------------------------------------------------- |
/// | `message`   | The one-line message describing the error. Also used at the top of reports.   |
/// | `labels`    | An array of label texts, one for each span of the error, in the same order.   |
/// | `help`      | Optional help text, describing what the user can do to fix the error.         |
///
/// Each tag accepts an expression. For structs with named fields, the fields are destructured
/// into scope (as references) before the expression is evaluated.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl ErrorKind for #name {
            #target
        }
    }.into()
}
