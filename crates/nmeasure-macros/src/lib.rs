extern crate proc_macro;
use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericParam, Ident, Type};

/// Derive `nmeasure::axes::Axes<T>` for a struct whose named fields are coordinate axes.
///
/// Careful! The struct must have exactly one generic parameter,
/// and every field must have exactly that type.
#[proc_macro_derive(Axes)]
pub fn derive_axes(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_axes2(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn derive_axes2(input: DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    let type_params: Vec<&Ident> = input
        .generics
        .params
        .iter()
        .filter_map(|p| match p {
            GenericParam::Type(t) => Some(&t.ident),
            _ => None,
        })
        .collect();
    let [param] = type_params.as_slice() else {
        return Err(syn::Error::new(
            input.generics.span(),
            "Axes structs must have a single generic parameter (the coordinate type)",
        ));
    };
    if input.generics.params.len() != 1 {
        return Err(syn::Error::new(
            input.generics.span(),
            "Axes structs may not have lifetime or const parameters",
        ));
    }

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            "Axes can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new(
            data.fields.span(),
            "Axes structs must have named fields",
        ));
    };

    let mut field_names = Vec::<&Ident>::new();
    for field in fields.named.iter() {
        let is_param = match &field.ty {
            Type::Path(p) => p.qself.is_none() && p.path.is_ident(*param),
            _ => false,
        };
        if !is_param {
            return Err(syn::Error::new(
                field.ty.span(),
                format!("every axis field must have type `{}`", param),
            ));
        }
        // Named fields always carry an ident
        if let Some(ident) = &field.ident {
            field_names.push(ident);
        }
    }

    let dim = field_names.len();
    let name_strs = field_names.iter().map(|f| f.to_string());
    let placeholders: Vec<Ident> = field_names
        .iter()
        .map(|f| Ident::new(&format!("__axis_{}", f), f.span()))
        .collect();
    let nexts = field_names.iter().map(|_| quote!(coords.next()));
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::nmeasure::axes::Axes<#param> for #name #ty_generics #where_clause {
            const DIM: usize = #dim;
            const NAMES: &'static [&'static str] = &[#(#name_strs),*];

            fn into_coords(self) -> ::nmeasure::__private::Vec<#param> {
                ::nmeasure::__private::vec![#(self.#field_names),*]
            }

            fn from_coords(
                coords: ::nmeasure::__private::Vec<#param>,
            ) -> ::nmeasure::error::Result<Self> {
                let found = coords.len();
                let mut coords = coords.into_iter();
                match (#(#nexts,)* coords.next()) {
                    (#(::core::option::Option::Some(#placeholders),)* ::core::option::Option::None) => {
                        ::core::result::Result::Ok(#name {
                            #(#field_names: #placeholders),*
                        })
                    }
                    _ => ::core::result::Result::Err(
                        ::nmeasure::error::MeasureError::DomainMismatch {
                            expected: #dim,
                            found,
                        },
                    ),
                }
            }
        }
    })
}
