// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Renders module ABIs as Move stub source.
//!
//! The ABI only carries fully qualified type strings, never the names of parameters or
//! type parameters, so those are synthesized positionally (`arg0`, `T0`, ...). Functions are
//! declared `native` since their bodies are unknown.

use aptos_mock_rest_client::{MoveFunction, MoveFunctionVisibility, MoveModule, MoveStruct};

/// Field the compiler inserts into structs declared without fields.
pub const PADDING_FIELD: &str = "dummy_field";

fn type_params(count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    let names: Vec<String> = (0..count).map(|i| format!("T{}", i)).collect();
    format!("<{}>", names.join(", "))
}

pub fn render_struct(s: &MoveStruct) -> String {
    let abilities = if s.abilities.is_empty() {
        String::new()
    } else {
        format!(" has {}", s.abilities.join(", "))
    };
    let fields: Vec<String> = s
        .fields
        .iter()
        .filter(|field| field.name != PADDING_FIELD)
        .map(|field| format!("    {}: {},", field.name, field.typ))
        .collect();

    format!(
        "struct {}{}{} {{\n{}\n}}",
        s.name,
        type_params(s.generic_type_params.len()),
        abilities,
        fields.join("\n")
    )
}

pub fn render_function(f: &MoveFunction) -> String {
    let entry = if f.is_entry { "entry " } else { "" };
    // Friend and private functions are rendered without a qualifier
    let visibility = match f.visibility {
        MoveFunctionVisibility::Public => "public ",
        MoveFunctionVisibility::Private | MoveFunctionVisibility::Friend => "",
    };
    let params: Vec<String> = f
        .params
        .iter()
        .enumerate()
        .map(|(i, typ)| format!("arg{}: {}", i, typ))
        .collect();
    let returns = if f.return_.is_empty() {
        String::new()
    } else {
        format!(": ({})", f.return_.join(", "))
    };

    format!(
        "native {}{}fun {}{}({}){} ;",
        entry,
        visibility,
        f.name,
        type_params(f.generic_type_params.len()),
        params.join(", "),
        returns
    )
}

/// Full text of `sources/<module>.move`.
pub fn render_module(module: &MoveModule) -> String {
    let structs: Vec<String> = module
        .structs
        .iter()
        .map(|s| format!("{}\n", render_struct(s)))
        .collect();
    let functions: Vec<String> = module
        .exposed_functions
        .iter()
        .map(|f| format!("{}\n", render_function(f)))
        .collect();

    format!(
        "module {}::{} {{\n{}\n{}\n}}",
        module.address,
        module.name,
        structs.join("\n"),
        functions.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use aptos_mock_rest_client::{
        MoveFunctionGenericTypeParam, MoveStructField, MoveStructGenericTypeParam,
    };

    fn field(name: &str, typ: &str) -> MoveStructField {
        MoveStructField {
            name: name.to_string(),
            typ: typ.to_string(),
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn move_struct(name: &str, abilities: &[&str], generics: usize, fields: Vec<MoveStructField>) -> MoveStruct {
        MoveStruct {
            name: name.to_string(),
            is_native: false,
            is_event: false,
            abilities: strings(abilities),
            generic_type_params: vec![MoveStructGenericTypeParam::default(); generics],
            fields,
        }
    }

    fn move_function(
        name: &str,
        visibility: MoveFunctionVisibility,
        is_entry: bool,
        generics: usize,
        params: &[&str],
        returns: &[&str],
    ) -> MoveFunction {
        MoveFunction {
            name: name.to_string(),
            visibility,
            is_entry,
            is_view: false,
            generic_type_params: vec![MoveFunctionGenericTypeParam::default(); generics],
            params: strings(params),
            return_: strings(returns),
        }
    }

    #[test]
    fn test_padding_field_is_dropped() {
        let s = move_struct("Marker", &[], 0, vec![field("dummy_field", "bool")]);
        assert_eq!(render_struct(&s), "struct Marker {\n\n}");
    }

    #[test]
    fn test_struct_with_abilities_generics_and_fields() {
        let s = move_struct("Pool", &["store", "key"], 2, vec![
            field("reserve_x", "0x1::coin::Coin<T0>"),
            field("reserve_y", "0x1::coin::Coin<T1>"),
        ]);
        assert_eq!(
            render_struct(&s),
            "struct Pool<T0, T1> has store, key {\n    reserve_x: 0x1::coin::Coin<T0>,\n    reserve_y: 0x1::coin::Coin<T1>,\n}"
        );
    }

    #[test]
    fn test_public_entry_function_without_return() {
        let f = move_function(
            "transfer",
            MoveFunctionVisibility::Public,
            true,
            0,
            &["u64", "address"],
            &[],
        );
        let rendered = render_function(&f);
        assert_eq!(rendered, "native entry public fun transfer(arg0: u64, arg1: address) ;");
        assert!(!rendered.contains("):"));
    }

    #[test]
    fn test_generic_function_with_returns() {
        let f = move_function(
            "balance",
            MoveFunctionVisibility::Public,
            false,
            1,
            &["address"],
            &["u64", "bool"],
        );
        assert_eq!(
            render_function(&f),
            "native public fun balance<T0>(arg0: address): (u64, bool) ;"
        );
    }

    #[test]
    fn test_friend_and_private_have_no_qualifier() {
        let friend = move_function("mint", MoveFunctionVisibility::Friend, false, 0, &[], &[]);
        assert_eq!(render_function(&friend), "native fun mint() ;");

        let private = move_function("run", MoveFunctionVisibility::Private, true, 0, &["&signer"], &[]);
        assert_eq!(render_function(&private), "native entry fun run(arg0: &signer) ;");
    }

    #[test]
    fn test_render_module() {
        let module = MoveModule {
            address: "0xa".to_string(),
            name: "pool".to_string(),
            friends: vec![],
            exposed_functions: vec![
                move_function("a", MoveFunctionVisibility::Public, false, 0, &[], &[]),
                move_function("b", MoveFunctionVisibility::Public, false, 0, &[], &["u8"]),
            ],
            structs: vec![move_struct("S", &["drop"], 0, vec![field("v", "u8")])],
        };

        assert_eq!(
            render_module(&module),
            "module 0xa::pool {\n\
             struct S has drop {\n    v: u8,\n}\n\n\
             native public fun a() ;\n\n\
             native public fun b(): (u8) ;\n\n\
             }"
        );
    }

    #[test]
    fn test_render_empty_module() {
        let module = MoveModule {
            address: "0xa".to_string(),
            name: "empty".to_string(),
            friends: vec![],
            exposed_functions: vec![],
            structs: vec![],
        };
        assert_eq!(render_module(&module), "module 0xa::empty {\n\n\n}");
    }
}
