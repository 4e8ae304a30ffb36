use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Variant};

struct EnumVariant<'a> {
    ident: &'a Ident,
    name: LitStr,
}

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "PropertyEnum can only be derived for enums",
        ));
    };

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "PropertyEnum does not support generic enums",
        ));
    }

    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "PropertyEnum requires at least one variant",
        ));
    }

    let variants = data.variants.iter().map(parse_variant).collect::<syn::Result<Vec<_>>>()?;

    let mut seen = FxHashSet::default();
    for variant in &variants {
        if !seen.insert(variant.name.value()) {
            return Err(syn::Error::new_spanned(
                &variant.name,
                format!("duplicate property name `{}`", variant.name.value()),
            ));
        }
    }

    let ty = &input.ident;
    let table = variants.iter().map(|v| {
        let ident = v.ident;
        let name = &v.name;
        quote! { (#name, #ty::#ident) }
    });
    let names = variants.iter().map(|v| {
        let ident = v.ident;
        let name = &v.name;
        quote! { #ty::#ident => #name, }
    });

    Ok(quote! {
        #[automatically_derived]
        impl ::sysprop::PropertyType for #ty {
            const KIND: ::sysprop::Kind = ::sysprop::Kind::Enum;

            fn from_converted(value: ::sysprop::Converted) -> ::core::option::Option<Self> {
                ::sysprop::resolve_enum(value, &[#(#table),*])
            }

            fn to_raw(&self) -> ::core::option::Option<::std::string::String> {
                let name: &'static str = match self {
                    #(#names)*
                };
                ::core::option::Option::Some(::std::borrow::ToOwned::to_owned(name))
            }
        }
    })
}

fn parse_variant(variant: &Variant) -> syn::Result<EnumVariant<'_>> {
    if !matches!(variant.fields, Fields::Unit) {
        return Err(syn::Error::new_spanned(
            variant,
            "PropertyEnum only supports unit variants",
        ));
    }

    let mut rename: Option<LitStr> = None;
    for attr in variant.attrs.iter().filter(|a| a.path().is_ident("property")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("rename") {
                return Err(meta.error("only `rename = \"...\"` is supported"));
            }
            if rename.is_some() {
                return Err(meta.error("duplicate `rename` argument"));
            }
            let lit: LitStr = meta.value()?.parse()?;
            if lit.value().trim().is_empty() {
                return Err(syn::Error::new_spanned(&lit, "rename must not be empty"));
            }
            rename = Some(lit);
            Ok(())
        })?;
    }

    let name =
        rename.unwrap_or_else(|| LitStr::new(&variant.ident.to_string(), variant.ident.span()));

    Ok(EnumVariant { ident: &variant.ident, name })
}
