// Copyright 2026 ReductSoftware UG
// This Source Code Form is subject to the terms of the Mozilla Public
//    License, v. 2.0. If a copy of the MPL was not distributed with this
//    file, You can obtain one at https://mozilla.org/MPL/2.0/.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error, Fields, Type};

/// Renders a newtype wrapper as a `200 OK` JSON response of its inner value.
#[proc_macro_derive(IntoResponse)]
pub fn into_response_derive(input: TokenStream) -> TokenStream {
    // Construct a representation of Rust code as a syntax tree
    // that we can manipulate
    let ast = parse_macro_input!(input as DeriveInput);

    // Build the trait implementation
    impl_into_response(&ast)
}

fn impl_into_response(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;
    let gen = quote! {
        impl axum::response::IntoResponse for #name {
            fn into_response(self) -> axum::response::Response {
                match serde_json::to_string(&self.0) {
                    Ok(body) => {
                        let mut headers = hyper::HeaderMap::new();
                        axum_extra::headers::HeaderMapExt::typed_insert(
                            &mut headers,
                            axum_extra::headers::ContentType::json(),
                        );
                        axum::response::IntoResponse::into_response((
                            hyper::StatusCode::OK,
                            headers,
                            body,
                        ))
                    }
                    Err(err) => axum::response::IntoResponse::into_response((
                        hyper::StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to serialize response: {}", err),
                    )),
                }
            }
        }
    };
    gen.into()
}

/// Generates `From` conversions in both directions between a newtype wrapper and its inner type.
#[proc_macro_derive(Twin)]
pub fn twin_derive(input: TokenStream) -> TokenStream {
    // Construct a representation of Rust code as a syntax tree
    // that we can manipulate
    let ast = parse_macro_input!(input as DeriveInput);

    // Build the trait implementation
    impl_twin(&ast)
}

fn impl_twin(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;
    let Data::Struct(data) = &ast.data else {
        return Error::new_spanned(name, "Twin derive only works on structs")
            .to_compile_error()
            .into();
    };
    let Fields::Unnamed(fields) = &data.fields else {
        return Error::new_spanned(name, "Twin derive only works for unnamed fields")
            .to_compile_error()
            .into();
    };
    let Some(Type::Path(inner)) = fields.unnamed.first().map(|field| &field.ty) else {
        return Error::new_spanned(name, "No type found")
            .to_compile_error()
            .into();
    };

    let gen = quote! {
        impl From<#inner> for #name {
            fn from(st: #inner) -> Self {
                Self(st)
            }
        }

        impl From<#name> for #inner {
            fn from(wrapper: #name) -> Self {
                wrapper.0
            }
        }
    };
    gen.into()
}
