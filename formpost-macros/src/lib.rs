use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, parse_macro_input};

/// Runs an async test on `test_utils::rt()`, so every test in the binary
/// shares one runtime and the servers spawned on it.
#[proc_macro_attribute]
pub fn shared_test_runtime(_attr: TokenStream, input: TokenStream) -> TokenStream {
	let input_fn = parse_macro_input!(input as ItemFn);

	let fn_attrs = &input_fn.attrs;
	let fn_vis = &input_fn.vis;
	let fn_name = &input_fn.sig.ident;
	let fn_generics = &input_fn.sig.generics;
	let fn_inputs = &input_fn.sig.inputs;
	let fn_output = &input_fn.sig.output;
	let fn_block = &input_fn.block;

	let result = quote! {
		#[test]
		#(#fn_attrs)*
		#fn_vis fn #fn_name #fn_generics(#fn_inputs) #fn_output {
			test_utils::rt().block_on(async #fn_block)
		}
	};

	result.into()
}
