extern crate proc_macro;

use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, GenericParam, Generics};

/// Add an `Encoding` bound to every type parameter.
fn add_trait_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(parse_quote!(tagwire::Encoding));
        }
    }
    generics
}

/// Derive macro for implementing the `Encoding` trait
///
/// A struct is encoded as a structure aggregate: the `STRUCTURE` tag, the field
/// count, then every field in declaration order. Named, tuple and unit structs
/// are supported. The generated code reads fields directly into `self`, so no
/// `Default` bound is needed on the fields.
///
/// Enums and unions are rejected at compile time; the `compile_fail` examples
/// live in the `tagwire` crate docs, where the macro resolves. The method-level sink and
/// source parameters use reserved names so they never collide with the
/// struct's own type parameters.
///
/// # Examples
///
/// ```ignore
/// #[derive(Encoding)]
/// struct Node {
///     name: u64,
///     parent: u16,
/// }
/// ```
#[proc_macro_derive(Encoding)]
pub fn derive_encoding(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(s) => &s.fields,
        Data::Enum(e) => {
            return syn::Error::new(
                e.enum_token.span,
                "#[derive(Encoding)] does not support enums",
            )
            .to_compile_error()
            .into();
        }
        Data::Union(u) => {
            return syn::Error::new(
                u.union_token.span,
                "#[derive(Encoding)] does not support unions",
            )
            .to_compile_error()
            .into();
        }
    };

    // Field accessors in declaration order; this order is the wire order.
    let members: Vec<proc_macro2::TokenStream> = match fields {
        Fields::Named(fields) => fields
            .named
            .iter()
            .filter_map(|f| f.ident.as_ref())
            .map(|ident| ident.to_token_stream())
            .collect(),
        Fields::Unnamed(fields) => (0..fields.unnamed.len())
            .map(|i| syn::Index::from(i).to_token_stream())
            .collect(),
        Fields::Unit => Vec::new(),
    };
    let arity = members.len();

    let generics = add_trait_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    TokenStream::from(quote! {
        impl #impl_generics tagwire::Encoding for #name #ty_generics #where_clause {
            #[inline]
            fn prefix(&self) -> tagwire::EncodingByte {
                tagwire::EncodingByte::STRUCTURE
            }

            fn size(&self) -> usize {
                tagwire::Index::<{ #arity }>::header_size(tagwire::EncodingByte::STRUCTURE)
                    #(+ tagwire::Encoding::size(&self.#members))*
            }

            #[inline]
            fn matches(prefix: tagwire::EncodingByte) -> bool {
                prefix == tagwire::EncodingByte::STRUCTURE
            }

            fn write_payload<__TagwireW: tagwire::Writer + ?Sized>(
                &self,
                _prefix: tagwire::EncodingByte,
                writer: &mut __TagwireW,
            ) -> tagwire::Result<()> {
                tagwire::Index::<{ #arity }>::write_count(writer)?;
                #(tagwire::Encoding::write(&self.#members, writer)?;)*
                Ok(())
            }

            fn read_payload<__TagwireR: tagwire::Reader + ?Sized>(
                &mut self,
                _prefix: tagwire::EncodingByte,
                reader: &mut __TagwireR,
            ) -> tagwire::Result<()> {
                tagwire::Index::<{ #arity }>::read_count(reader)?;
                #(tagwire::Encoding::read(&mut self.#members, reader)?;)*
                Ok(())
            }
        }
    })
}
