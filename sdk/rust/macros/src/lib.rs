use {
  proc_macro::TokenStream,
  quote::{format_ident, quote},
  syn::{parse_macro_input, FnArg, Ident, ItemFn, LitStr, ReturnType},
};

const DEFAULT_EXPORT: &str = "deploy_contract";

/// Marks a `fn(u64) -> Result<T, ModuleError>` as the deployment
/// entrypoint of a module, where `T: Into<Vec<u8>>` is the address.
///
/// The annotated function is left as is. Next to it an exported
/// `extern "C" fn deploy_contract(u64) -> u64` is generated that
/// hands the address to the host or aborts with the error.
/// A different export name can be given as `#[deployer("name")]`.
#[proc_macro_attribute]
pub fn deployer(args: TokenStream, annotated_item: TokenStream) -> TokenStream {
  let export = if args.is_empty() {
    format_ident!("{}", DEFAULT_EXPORT)
  } else {
    let name = parse_macro_input!(args as LitStr);
    format_ident!("{}", name.value())
  };

  let input_fn = parse_macro_input!(annotated_item as ItemFn);

  // make sure the signature fits the ABI before generating anything
  if let Err(error) = validate_signature(&input_fn) {
    return TokenStream::from(error.to_compile_error());
  }

  let export_fn = wrap_entrypoint_abi(&input_fn.sig.ident, export);
  TokenStream::from(quote! {
    #input_fn
    #export_fn
  })
}

fn validate_signature(input_fn: &ItemFn) -> syn::Result<()> {
  let sig = &input_fn.sig;
  let single_typed_arg = sig.inputs.len() == 1
    && matches!(sig.inputs.first(), Some(FnArg::Typed(_)));

  if !single_typed_arg || matches!(sig.output, ReturnType::Default) {
    return Err(syn::Error::new_spanned(
      sig,
      "deployment entrypoint is expected to have the signature of \
       fn(u64) -> Result<impl Into<Vec<u8>>, ModuleError>",
    ));
  }

  if sig.asyncness.is_some() || !sig.generics.params.is_empty() {
    return Err(syn::Error::new_spanned(
      sig,
      "deployment entrypoint cannot be async or generic",
    ));
  }

  Ok(())
}

/// Translates Rust-style error handling to the ABI representation:
/// a packed pointer to the address on success and a call to the
/// host `abort` with the error otherwise.
fn wrap_entrypoint_abi(inner: &Ident, export: Ident) -> proc_macro2::TokenStream {
  quote! {
    #[no_mangle]
    pub extern "C" fn #export(timestamp: u64) -> u64 {
      rensa_deployer_sdk::set_panic_hook();
      match #inner(timestamp) {
        Ok(address) => rensa_deployer_sdk::pack(address),
        Err(error) => rensa_deployer_sdk::abort(error),
      }
    }
  }
}
