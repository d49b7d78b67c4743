//! Procedural macros for `frontmvc`.
//!
//! `#[controller]` turns an inherent `impl` block into a registrable controller: it reads the
//! `#[action]` markers on its methods and generates the `Controller` dispatch and the
//! `ControllerType` metadata.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    bracketed,
    parse::{Parse, ParseStream},
    parse_macro_input, Attribute, Ident, ImplItem, ItemImpl, LitStr, Meta, Path,
    Result as SynResult, Token, Type,
};

/// Tag the router reads for controllers that skip model construction.
const NO_MODEL_TAG: &str = "noModel";

struct ControllerArgs {
    default_action: Option<LitStr>,
    no_model: bool,
    tags: Vec<LitStr>,
    constructor: Option<Path>,
}

impl Parse for ControllerArgs {
    fn parse(input: ParseStream) -> SynResult<Self> {
        let mut args = ControllerArgs {
            default_action: None,
            no_model: false,
            tags: Vec::new(),
            constructor: None,
        };
        while !input.is_empty() {
            let key: Ident = input.parse()?;
            match key.to_string().as_str() {
                "no_model" => args.no_model = true,
                "default_action" => {
                    input.parse::<Token![=]>()?;
                    args.default_action = Some(input.parse()?);
                }
                "tag" => {
                    input.parse::<Token![=]>()?;
                    args.tags.push(input.parse()?);
                }
                "constructor" => {
                    input.parse::<Token![=]>()?;
                    args.constructor = Some(input.parse()?);
                }
                other => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!("unexpected controller option `{other}`"),
                    ))
                }
            }
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(args)
    }
}

struct ActionDef {
    ident: Ident,
    shapes: Vec<Vec<Option<String>>>,
}

/// `[[], ["id"], ["id", null]]`
fn parse_shapes(input: ParseStream) -> SynResult<Vec<Vec<Option<String>>>> {
    let outer;
    bracketed!(outer in input);
    let mut shapes = Vec::new();
    while !outer.is_empty() {
        let inner;
        bracketed!(inner in outer);
        let mut slots = Vec::new();
        while !inner.is_empty() {
            if inner.peek(LitStr) {
                slots.push(Some(inner.parse::<LitStr>()?.value()));
            } else {
                let ident: Ident = inner.parse()?;
                if ident != "null" {
                    return Err(syn::Error::new(
                        ident.span(),
                        "argument slots are string literals or `null`",
                    ));
                }
                slots.push(None);
            }
            if inner.is_empty() {
                break;
            }
            inner.parse::<Token![,]>()?;
        }
        shapes.push(slots);
        if outer.is_empty() {
            break;
        }
        outer.parse::<Token![,]>()?;
    }
    Ok(shapes)
}

fn parse_action_attr(attr: &Attribute) -> SynResult<Vec<Vec<Option<String>>>> {
    match &attr.meta {
        Meta::Path(_) => Ok(Vec::new()),
        Meta::List(list) => list.parse_args_with(|input: ParseStream| {
            let key: Ident = input.parse()?;
            if key != "args" {
                return Err(syn::Error::new(key.span(), "expected `args = [...]`"));
            }
            input.parse::<Token![=]>()?;
            let shapes = parse_shapes(input)?;
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
            Ok(shapes)
        }),
        Meta::NameValue(nv) => Err(syn::Error::new_spanned(
            nv,
            "use `#[action]` or `#[action(args = [...])]`",
        )),
    }
}

fn type_ident(ty: &Type) -> SynResult<Ident> {
    match ty {
        Type::Path(p) => p
            .path
            .segments
            .last()
            .map(|segment| segment.ident.clone())
            .ok_or_else(|| syn::Error::new_spanned(ty, "controller type has no name")),
        _ => Err(syn::Error::new_spanned(
            ty,
            "#[controller] needs a named type",
        )),
    }
}

/// Collect `#[action]` methods, stripping the marker attributes from the impl block.
fn take_actions(input: &mut ItemImpl) -> SynResult<Vec<ActionDef>> {
    let mut actions = Vec::new();
    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        let mut shapes = None;
        let mut kept = Vec::with_capacity(method.attrs.len());
        for attr in method.attrs.drain(..) {
            if attr.path().is_ident("action") {
                shapes = Some(parse_action_attr(&attr)?);
            } else {
                kept.push(attr);
            }
        }
        method.attrs = kept;
        if let Some(shapes) = shapes {
            actions.push(ActionDef {
                ident: method.sig.ident.clone(),
                shapes,
            });
        }
    }
    Ok(actions)
}

fn shape_tokens(shape: &[Option<String>]) -> TokenStream2 {
    let slots: Vec<TokenStream2> = shape
        .iter()
        .map(|slot| match slot {
            Some(name) => quote! {
                ::std::option::Option::Some(::std::string::String::from(#name))
            },
            None => quote! { ::std::option::Option::None },
        })
        .collect();
    quote! { ::frontmvc::metadata::ArgShape::new(::std::vec![#(#slots),*]) }
}

fn expand(args: ControllerArgs, mut input: ItemImpl) -> SynResult<TokenStream2> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[controller] goes on an inherent impl block",
        ));
    }

    let name = type_ident(&input.self_ty)?.to_string();
    let actions = take_actions(&mut input)?;

    if let Some(default) = &args.default_action {
        if !actions.iter().any(|a| a.ident == default.value()) {
            return Err(syn::Error::new(
                default.span(),
                format!("default action `{}` is not an #[action] method", default.value()),
            ));
        }
    }

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    let arms: Vec<TokenStream2> = actions
        .iter()
        .map(|action| {
            let ident = &action.ident;
            let name = ident.to_string();
            quote! { #name => self.#ident(ctx, params), }
        })
        .collect();

    let mut meta_calls: Vec<TokenStream2> = Vec::new();
    if args.no_model {
        meta_calls.push(quote! { .tag(#NO_MODEL_TAG) });
    }
    for tag in &args.tags {
        meta_calls.push(quote! { .tag(#tag) });
    }
    if let Some(default) = &args.default_action {
        meta_calls.push(quote! { .default_action(#default) });
    }
    for action in &actions {
        let name = action.ident.to_string();
        let shapes: Vec<TokenStream2> = action.shapes.iter().map(|s| shape_tokens(s)).collect();
        meta_calls.push(quote! { .action(#name, ::std::vec![#(#shapes),*]) });
    }

    let construct = match &args.constructor {
        Some(path) => quote! { #path(ctx) },
        None => quote! {
            let _ = ctx;
            ::std::result::Result::Ok(<Self as ::std::default::Default>::default())
        },
    };

    Ok(quote! {
        #input

        impl #impl_generics ::frontmvc::controller::Controller for #self_ty #where_clause {
            #[allow(unused_variables)]
            fn invoke(
                &mut self,
                ctx: &mut ::frontmvc::controller::ControllerContext,
                action: &str,
                params: &::frontmvc::router::Parameters,
            ) -> ::std::result::Result<(), ::frontmvc::controller::ControllerError> {
                match action {
                    #(#arms)*
                    _ => ::std::result::Result::Err(
                        ::frontmvc::controller::ControllerError::UnknownAction {
                            action: ::std::string::ToString::to_string(action),
                        },
                    ),
                }
            }
        }

        impl #impl_generics ::frontmvc::controller::ControllerType for #self_ty #where_clause {
            const NAME: &'static str = #name;

            fn metadata() -> ::frontmvc::metadata::ControllerMeta {
                ::frontmvc::metadata::ControllerMeta::new()
                    #(#meta_calls)*
            }

            fn construct(
                ctx: &mut ::frontmvc::controller::ControllerContext,
            ) -> ::std::result::Result<Self, ::frontmvc::controller::ControllerError> {
                #construct
            }
        }
    })
}

/// Make an inherent `impl` block a routable controller.
///
/// ```rust,ignore
/// #[controller(default_action = "home", no_model)]
/// impl Main {
///     #[action(args = [[]])]
///     pub fn home(&mut self, ctx: &mut ControllerContext, params: &Parameters)
///         -> Result<(), ControllerError> { ... }
/// }
/// ```
#[proc_macro_attribute]
pub fn controller(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ControllerArgs);
    let input = parse_macro_input!(item as ItemImpl);
    match expand(args, input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
