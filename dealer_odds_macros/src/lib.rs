use proc_macro::TokenStream as TokenStream1;
use quote::ToTokens;

/// This macro is added before a method of `Dealer` struct in the impl block.
/// Use this macro to first check if the dealer is exactly in the phase given in
/// the attribute.
///
/// For example, `#[allowed_phase(Playing)]` will make a method first check
/// if the current dealer phase is `Playing`. If not, the method will return
/// `Error::NotAllowedInPhase`.
#[proc_macro_attribute]
pub fn allowed_phase(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    let mut ast: syn::ImplItemFn = syn::parse(item).unwrap();
    let phase = attr.to_string();
    let function_name = ast.sig.ident.to_string();
    let code = format!(
        r#"
    if self.phase != DealerPhase::{phase} {{
        return Err(crate::Error::NotAllowedInPhase {{
            operation: "{function_name}",
            expected: DealerPhase::{phase},
            actual: self.phase,
        }});
    }}
"#
    );
    let early_return: TokenStream1 = code.parse().unwrap();
    let early_return: syn::Stmt = syn::parse(early_return).unwrap();
    ast.block.stmts.insert(0, early_return);
    ast.into_token_stream().into()
}
