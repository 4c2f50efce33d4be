mod common;

use std::collections::{BTreeMap, BTreeSet};

use pretty_assertions::assert_eq;

use bindfilter::{
    apply_filters, Canonicalize, DescEntry, FuncDesc, KnownTypeResolver, Qualifier, Registry,
    RuleSet, SkipTypes, TypeDescriptor, TypeMatcher,
};

use common::{atom, method, param, registry_of, vector_of, ClassBuilder};

fn global_skips(names: &[&str]) -> Option<SkipTypes> {
    Some(SkipTypes::Global(
        names
            .iter()
            .map(|name| TypeMatcher::new(atom(name)))
            .collect(),
    ))
}

fn method_names(registry: &Registry, class: &str) -> BTreeSet<String> {
    registry
        .class(class)
        .expect("class should exist")
        .method_names()
        .map(str::to_string)
        .collect()
}

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn global_skip_types_removes_matching_attributes() {
    let mut registry = registry_of(vec![ClassBuilder::new("Foo")
        .attr("x", atom("float64"))
        .attr("y", atom("int32"))
        .build()]);
    let rules = RuleSet {
        skip_types: global_skips(&["float64"]),
        ..Default::default()
    };

    apply_filters(&rules, &KnownTypeResolver::with_defaults(), &mut registry);

    let foo = registry.class("Foo").unwrap();
    assert_eq!(foo.attrs.len(), 1);
    assert_eq!(foo.attrs.get("y"), Some(&atom("int32")));
}

#[test]
fn skip_methods_removes_named_prefixes() {
    let mut registry = registry_of(vec![ClassBuilder::new("Computer")
        .simple_method("checkEmail")
        .simple_method("turnOn")
        .simple_method("blowUp")
        .simple_method("sleep")
        .simple_method("crash")
        .build()]);
    let rules = RuleSet {
        skip_methods: Some(BTreeMap::from([(
            "Computer".to_string(),
            vec!["blowUp".to_string(), "sleep".to_string(), "crash".to_string()],
        )])),
        ..Default::default()
    };

    apply_filters(&rules, &KnownTypeResolver::with_defaults(), &mut registry);

    assert_eq!(
        method_names(&registry, "Computer"),
        names(&["checkEmail", "turnOn"])
    );
}

#[test]
fn containment_reaches_into_parametrized_arguments() {
    let mut registry = registry_of(vec![ClassBuilder::new("Holder")
        .method(
            method("foo", vec![param("a", vector_of(atom("float64")))]),
            None,
        )
        .simple_method("bar")
        .build()]);
    let rules = RuleSet {
        skip_types: global_skips(&["float64"]),
        ..Default::default()
    };

    apply_filters(&rules, &KnownTypeResolver::with_defaults(), &mut registry);

    assert_eq!(method_names(&registry, "Holder"), names(&["bar"]));
}

#[test]
fn include_methods_wins_over_earlier_survivors() {
    let mut registry = registry_of(vec![ClassBuilder::new("Computer")
        .simple_method("checkEmail")
        .simple_method("turnOn")
        .simple_method("blowUp")
        .build()]);
    let rules = RuleSet {
        skip_methods: Some(BTreeMap::from([(
            "Computer".to_string(),
            vec!["blowUp".to_string()],
        )])),
        include_methods: Some(BTreeMap::from([(
            "Computer".to_string(),
            BTreeSet::from(["turnOn".to_string()]),
        )])),
        ..Default::default()
    };

    apply_filters(&rules, &KnownTypeResolver::with_defaults(), &mut registry);

    // checkEmail survived every skip pass, but is not on the allow-list
    assert_eq!(method_names(&registry, "Computer"), names(&["turnOn"]));
}

#[test]
fn auto_skip_removes_unresolvable_attributes() {
    let mut registry = registry_of(vec![ClassBuilder::new("Gadget")
        .attr("z", atom("unknownclass"))
        .attr("w", atom("int32"))
        .build()]);
    let rules = RuleSet {
        skip_auto: true,
        ..Default::default()
    };
    let mut resolver = KnownTypeResolver::with_defaults();
    resolver.learn_registry(&registry);

    apply_filters(&rules, &resolver, &mut registry);

    let gadget = registry.class("Gadget").unwrap();
    assert!(!gadget.attrs.contains_key("z"));
    assert!(gadget.attrs.contains_key("w"));
}

#[test]
fn auto_skip_leaves_no_unresolvable_type_behind() {
    let mut registry = registry_of(vec![
        ClassBuilder::new("Widget")
            .attr("ok", vector_of(atom("int32")))
            .attr("bad", vector_of(atom("mystery")))
            .method(
                method("ret_bad", vec![]),
                Some(atom("mystery")),
            )
            .method(
                method(
                    "arg_bad",
                    vec![
                        param("a", atom("int32")),
                        param("b", atom("mystery")),
                    ],
                ),
                Some(atom("void")),
            )
            .method(method("ctor", vec![param("n", atom("int64"))]), None)
            .build(),
        // classes may reference each other
        ClassBuilder::new("Panel")
            .attr("widget", atom("Widget"))
            .build(),
    ]);
    let rules = RuleSet {
        skip_auto: true,
        ..Default::default()
    };
    let mut resolver = KnownTypeResolver::with_defaults();
    resolver.learn_registry(&registry);

    apply_filters(&rules, &resolver, &mut registry);

    for desc in registry.classes() {
        for ty in desc.attrs.values() {
            assert!(resolver.canon(ty).is_ok(), "attr type {ty} left behind");
        }
        for (sig, returns) in &desc.methods {
            if let Some(ret) = returns {
                assert!(resolver.canon(ret).is_ok(), "return type {ret} left behind");
            }
            for arg in &sig.args {
                assert!(
                    resolver.canon(&arg.ty).is_ok(),
                    "argument type {} left behind",
                    arg.ty
                );
            }
        }
    }
    assert_eq!(
        method_names(&registry, "Widget"),
        names(&["ctor"]),
        "only the resolvable constructor should survive"
    );
    assert!(registry.class("Panel").unwrap().attrs.contains_key("widget"));
}

#[test]
fn auto_skip_purges_allow_listed_methods_before_inclusion() {
    let mut registry = registry_of(vec![ClassBuilder::new("Computer")
        .simple_method("turnOn")
        .method(
            method("ghost", vec![param("g", atom("ectoplasm"))]),
            Some(atom("void")),
        )
        .build()]);
    let rules = RuleSet {
        skip_auto: true,
        include_methods: Some(BTreeMap::from([(
            "Computer".to_string(),
            BTreeSet::from(["turnOn".to_string(), "ghost".to_string()]),
        )])),
        ..Default::default()
    };
    let mut resolver = KnownTypeResolver::with_defaults();
    resolver.learn_registry(&registry);

    apply_filters(&rules, &resolver, &mut registry);

    // the allow-list only re-filters what auto-skip left
    assert_eq!(method_names(&registry, "Computer"), names(&["turnOn"]));
}

#[test]
fn pipeline_is_idempotent() {
    let build = || {
        registry_of(vec![
            ClassBuilder::new("Computer")
                .attr("ram", atom("uint64"))
                .attr("temp", atom("float64"))
                .attr("tag", atom("unknownclass"))
                .simple_method("checkEmail")
                .simple_method("turnOn")
                .simple_method("blowUp")
                .method(
                    method("resize", vec![param("v", vector_of(atom("float64")))]),
                    Some(atom("void")),
                )
                .build(),
            ClassBuilder::new("Monitor")
                .attr("width", atom("int32"))
                .simple_method("powerCycle")
                .build(),
        ])
    };
    let rules = RuleSet {
        skip_types: global_skips(&["float64"]),
        skip_methods: Some(BTreeMap::from([(
            "Computer".to_string(),
            vec!["blowUp".to_string()],
        )])),
        skip_attrs: Some(BTreeMap::from([(
            "Monitor".to_string(),
            vec!["width".to_string()],
        )])),
        include_methods: Some(BTreeMap::from([(
            "Computer".to_string(),
            BTreeSet::from(["turnOn".to_string(), "checkEmail".to_string()]),
        )])),
        skip_auto: true,
    };
    let mut resolver = KnownTypeResolver::with_defaults();
    let mut registry = build();
    resolver.learn_registry(&registry);

    apply_filters(&rules, &resolver, &mut registry);
    let after_once = registry.clone();
    apply_filters(&rules, &resolver, &mut registry);

    assert_eq!(registry, after_once);
}

#[test]
fn per_class_rules_leave_other_classes_alone() {
    let mut registry = registry_of(vec![
        ClassBuilder::new("Foo").attr("x", atom("float64")).build(),
        ClassBuilder::new("Bar").attr("x", atom("float64")).build(),
    ]);
    let rules = RuleSet {
        skip_types: Some(SkipTypes::PerClass(BTreeMap::from([(
            "Foo".to_string(),
            vec![TypeMatcher::new(atom("float64"))],
        )]))),
        ..Default::default()
    };

    apply_filters(&rules, &KnownTypeResolver::with_defaults(), &mut registry);

    assert!(registry.class("Foo").unwrap().attrs.is_empty());
    assert!(registry.class("Bar").unwrap().attrs.contains_key("x"));
}

#[test]
fn exact_patterns_do_not_match_shared_atoms() {
    let exact = TypeMatcher::new(TypeDescriptor::qualified(
        vector_of(atom("float64")),
        Qualifier::Ref,
    ));
    let mut registry = registry_of(vec![ClassBuilder::new("Foo")
        .attr("plain", atom("float64"))
        .attr("vec", vector_of(atom("float64")))
        .attr(
            "vec_ref",
            TypeDescriptor::qualified(vector_of(atom("float64")), Qualifier::Ref),
        )
        .build()]);
    let rules = RuleSet {
        skip_types: Some(SkipTypes::Global(vec![exact])),
        ..Default::default()
    };

    apply_filters(&rules, &KnownTypeResolver::with_defaults(), &mut registry);

    let foo = registry.class("Foo").unwrap();
    assert!(foo.attrs.contains_key("plain"));
    assert!(foo.attrs.contains_key("vec"));
    assert!(!foo.attrs.contains_key("vec_ref"));
}

#[test]
fn one_prefix_entry_removes_one_overload() {
    let mut registry = registry_of(vec![ClassBuilder::new("Computer")
        .method(
            method("blowUp", vec![param("x", atom("float64"))]),
            Some(atom("void")),
        )
        .method(
            method("blowUp", vec![param("x", atom("int32"))]),
            Some(atom("void")),
        )
        .build()]);
    let rules = RuleSet {
        skip_methods: Some(BTreeMap::from([(
            "Computer".to_string(),
            vec!["blowUp".to_string()],
        )])),
        ..Default::default()
    };

    apply_filters(&rules, &KnownTypeResolver::with_defaults(), &mut registry);

    let computer = registry.class("Computer").unwrap();
    assert_eq!(computer.methods.len(), 1);
    // signatures iterate in sorted order, so the float64 overload went first
    let survivor = computer.methods.keys().next().unwrap();
    assert_eq!(survivor.args[0].ty, atom("int32"));
}

#[test]
fn missing_names_warn_and_do_not_abort_the_pass() {
    let mut registry = registry_of(vec![ClassBuilder::new("Computer")
        .attr("ram", atom("uint64"))
        .simple_method("crash")
        .build()]);
    let rules = RuleSet {
        skip_methods: Some(BTreeMap::from([(
            "Computer".to_string(),
            vec!["nonexistent".to_string(), "crash".to_string()],
        )])),
        skip_attrs: Some(BTreeMap::from([(
            "Computer".to_string(),
            vec!["missing".to_string(), "ram".to_string()],
        )])),
        ..Default::default()
    };

    apply_filters(&rules, &KnownTypeResolver::with_defaults(), &mut registry);

    let computer = registry.class("Computer").unwrap();
    assert!(computer.methods.is_empty());
    assert!(computer.attrs.is_empty());
}

#[test]
fn empty_rule_lists_run_but_match_nothing() {
    let mut registry = registry_of(vec![ClassBuilder::new("Foo")
        .attr("x", atom("float64"))
        .simple_method("go")
        .build()]);
    let untouched = registry.clone();
    let rules = RuleSet {
        skip_types: Some(SkipTypes::Global(vec![])),
        skip_methods: Some(BTreeMap::new()),
        skip_attrs: Some(BTreeMap::new()),
        include_methods: Some(BTreeMap::new()),
        skip_auto: false,
    };

    apply_filters(&rules, &KnownTypeResolver::with_defaults(), &mut registry);

    assert_eq!(registry, untouched);
}

#[test]
fn function_entries_pass_through_untouched() {
    let mut registry = registry_of(vec![ClassBuilder::new("Foo")
        .attr("x", atom("float64"))
        .build()]);
    registry.insert(
        "pack",
        "free_fn",
        DescEntry::Function(FuncDesc {
            name: "free_fn".to_string(),
            args: vec![param("a", atom("float64"))],
            returns: Some(atom("float64")),
        }),
    );
    let rules = RuleSet {
        skip_types: global_skips(&["float64"]),
        skip_auto: true,
        ..Default::default()
    };

    apply_filters(&rules, &KnownTypeResolver::with_defaults(), &mut registry);

    assert!(registry.class("Foo").unwrap().attrs.is_empty());
    let entry = &registry.modules["pack"]["free_fn"];
    assert!(matches!(entry, DescEntry::Function(f) if f.args.len() == 1));
}
