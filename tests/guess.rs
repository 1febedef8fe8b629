use json_guess::{Error, GuessOptions, JsonType, guess, guess_samples, guess_with, render};
use serde_json::{Value, json};

fn types_of(v: Value) -> String {
    render::typescript(&guess(&v).unwrap())
}

fn schema_of(v: Value) -> Value {
    serde_json::to_value(guess(&v).unwrap()).unwrap()
}

// ————————————————————————————————————————————————————————————————————————————
// RENDERED
// ————————————————————————————————————————————————————————————————————————————

#[test]
fn object_with_array_with_objects_in_array() {
    let v = json!({
        "things": [
            {"name": "polly"},
            {"name": "polly", "boop": {"kind": "red"}},
            {"name": "polly", "boop": {"subkind": "green"}},
        ]
    });
    insta::assert_snapshot!(types_of(v), @r#"
    type Boop = {
      kind?: string;
      subkind?: string;
    };

    type Things = {
      name: string;
      boop?: Boop;
    };

    type Root = {
      things: Array<Things>;
    };
    "#);
}

#[test]
fn array_with_natives() {
    insta::assert_snapshot!(types_of(json!(["test", 32, false])), @"type Root = Array<string | number | boolean>;");
}

#[test]
fn object_with_primitives() {
    insta::assert_snapshot!(types_of(json!({"name": "test", "age": 32, "rad": true})), @r#"
    type Root = {
      name: string;
      age: number;
      rad: boolean;
    };
    "#);
}

#[test]
fn array_with_object_variants() {
    insta::assert_snapshot!(types_of(json!([{"name": "test", "rad": true}, {"age": 32}])), @r#"
    type Guessed = {
      name?: string;
      rad?: boolean;
      age?: number;
    };

    type Root = Array<Guessed>;
    "#);
}

#[test]
fn detects_nullable_fields() {
    insta::assert_snapshot!(types_of(json!([{"name": "test", "rad": true}, {"name": "foo", "age": 32}])), @r#"
    type Guessed = {
      name: string;
      rad?: boolean;
      age?: number;
    };

    type Root = Array<Guessed>;
    "#);
}

#[test]
fn nested_arrays() {
    insta::assert_snapshot!(types_of(json!([[1, 2, 4]])), @"type Root = Array<Array<number>>;");
    insta::assert_snapshot!(
        types_of(json!([[1, "lollerskates", 4]])),
        @"type Root = Array<Array<number | string>>;"
    );
    insta::assert_snapshot!(
        types_of(json!([[[[1, "lollerskates", 4]]]])),
        @"type Root = Array<Array<Array<Array<number | string>>>>;"
    );
}

#[test]
fn array_of_arrays() {
    insta::assert_snapshot!(types_of(json!([[1, 2, 4], [5, 6, 7]])), @"type Root = Array<Array<number>>;");
    insta::assert_snapshot!(
        types_of(json!([[1, 2, 4], ["foo", true]])),
        @"type Root = Array<Array<number | string | boolean>>;"
    );
}

#[test]
fn null_in_native_arrays() {
    insta::assert_snapshot!(types_of(json!([1, "3", null])), @"type Root = Array<number | string | null>;");
}

#[test]
fn null_in_object_arrays() {
    insta::assert_snapshot!(types_of(json!([{"name": "boop"}, null, {"name": "foo"}])), @r#"
    type Guessed = {
      name: string;
    };

    type Root = Array<Guessed | null>;
    "#);
}

#[test]
fn mixed_arrays() {
    insta::assert_snapshot!(types_of(json!([{"name": "boop"}, "foo", null, [1, 2, 3]])), @r#"
    type Guessed = {
      name: string;
    };

    type Root = Array<Guessed | Array<number> | string | null>;
    "#);
}

#[test]
fn colliding_field_names_are_numbered() {
    let v = json!({
        "nameMe": {"name": "test"},
        "boop": {"nameMe": {"age": 32}},
    });
    insta::assert_snapshot!(types_of(v), @r#"
    type NameMe1 = {
      name: string;
    };

    type NameMe2 = {
      age: number;
    };

    type Boop = {
      nameMe: NameMe2;
    };

    type Root = {
      nameMe: NameMe1;
      boop: Boop;
    };
    "#);
}

#[test]
fn hal_documents_do_not_repeat_shared_types() {
    let v = json!({
        "_links": {
            "self": {"href": "http://example.com/api/book/hal-cookbook"},
            "next": {"href": "http://example.com/api/book/hal-case-study"},
            "prev": {"href": "http://example.com/api/book/json-and-beyond"},
            "first": {"href": "http://example.com/api/book/catalog"},
            "last": {"href": "http://example.com/api/book/upcoming-books"},
        },
        "_embedded": {
            "author": {
                "_links": {"self": {"href": "http://example.com/api/author/shahadat"}},
                "id": "shahadat",
                "name": "Shahadat Hossain Khan",
                "homepage": "http://author-example.com",
            }
        },
        "id": "hal-cookbook",
        "name": "HAL Cookbook",
    });
    insta::assert_snapshot!(types_of(v), @r#"
    type Self = {
      href: string;
    };

    type _links1 = {
      self: Self;
      next: Self;
      prev: Self;
      first: Self;
      last: Self;
    };

    type _links2 = {
      self: Self;
    };

    type Author = {
      _links: _links2;
      id: string;
      name: string;
      homepage: string;
    };

    type _embedded = {
      author: Author;
    };

    type Root = {
      _links: _links1;
      _embedded: _embedded;
      id: string;
      name: string;
    };
    "#);
}

#[test]
fn arrays_are_inlined_into_fields() {
    insta::assert_snapshot!(types_of(json!({"things": [1, 2, 3]})), @r#"
    type Root = {
      things: Array<number>;
    };
    "#);
}

#[test]
fn object_array_children_borrow_the_field_name() {
    insta::assert_snapshot!(types_of(json!({"things": [{"count": 1}, {"count": 2}]})), @r#"
    type Things = {
      count: number;
    };

    type Root = {
      things: Array<Things>;
    };
    "#);
}

#[test]
fn equal_types_are_combined() {
    let v = json!({
        "image": {"href": "https://example.com/image"},
        "episodes": [{"image": {"href": "https://example.com/image"}}],
    });
    insta::assert_snapshot!(types_of(v), @r#"
    type Image = {
      href: string;
    };

    type Episodes = {
      image: Image;
    };

    type Root = {
      image: Image;
      episodes: Array<Episodes>;
    };
    "#);
}

// ————————————————————————————————————————————————————————————————————————————
// STRUCTURAL
// ————————————————————————————————————————————————————————————————————————————

#[test]
fn empty_object_is_a_single_root() {
    assert_eq!(
        schema_of(json!({})),
        json!([{"name": "Root", "type": {"kind": "object", "fields": []}, "isRoot": true}])
    );
}

#[test]
fn single_kind_array_is_not_a_union() {
    assert_eq!(
        schema_of(json!([1])),
        json!([{
            "name": "Root",
            "type": {"kind": "array", "type": {"kind": "primitive", "type": "number"}},
            "isRoot": true
        }])
    );
    assert_eq!(schema_of(json!([1, 2, 3])), schema_of(json!([1])));
}

#[test]
fn empty_array_elements_are_never() {
    assert_eq!(
        schema_of(json!([])),
        json!([{
            "name": "Root",
            "type": {"kind": "array", "type": {"kind": "primitive", "type": "never"}},
            "isRoot": true
        }])
    );
    assert_eq!(
        schema_of(json!({"things": []})),
        json!([{
            "name": "Root",
            "type": {
                "kind": "object",
                "fields": [{
                    "name": "things",
                    "type": {"kind": "array", "type": {"kind": "primitive", "type": "never"}},
                    "nullable": false
                }]
            },
            "isRoot": true
        }])
    );
}

#[test]
fn mixed_array_lists_objects_before_primitives() {
    assert_eq!(
        schema_of(json!([1, "test", true, {"name": "test"}])),
        json!([
            {
                "name": "Guessed",
                "type": {
                    "kind": "object",
                    "fields": [{"name": "name", "type": {"kind": "primitive", "type": "string"}, "nullable": false}]
                },
                "isRoot": false
            },
            {
                "name": "Root",
                "type": {
                    "kind": "array",
                    "type": {
                        "kind": "union",
                        "types": [
                            {"kind": "named", "name": "Guessed"},
                            {"kind": "primitive", "type": "number"},
                            {"kind": "primitive", "type": "string"},
                            {"kind": "primitive", "type": "boolean"}
                        ]
                    }
                },
                "isRoot": true
            }
        ])
    );
}

#[test]
fn union_with_one_object_still_names_it() {
    let types = guess(&json!({"things": [1, "test", true, {"name": "test"}]})).unwrap();
    let names: Vec<_> = types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Things", "Root"]);
}

#[test]
fn merging_a_shape_with_itself_is_idempotent() {
    let item = json!({"id": 1, "tags": ["a"], "owner": {"login": "x"}});
    let once = guess(&json!([item.clone()])).unwrap();
    let many = guess(&json!([item.clone(), item.clone(), item.clone(), item])).unwrap();
    assert_eq!(once, many);
}

#[test]
fn every_name_is_unique_and_one_root_exists() {
    let v = json!({
        "a": {"item": {"x": 1}},
        "b": {"item": {"y": 1}},
        "c": {"item": {"z": 1}},
        "item1": {"w": true},
    });
    let types = guess(&v).unwrap();
    let mut names: Vec<_> = types.iter().map(|t| t.name.clone()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), types.len());
    assert_eq!(types.iter().filter(|t| t.is_root).count(), 1);
}

// ————————————————————————————————————————————————————————————————————————————
// LIMITS & OPTIONS
// ————————————————————————————————————————————————————————————————————————————

fn nested_array(levels: usize) -> Value {
    let mut v = json!(1);
    for _ in 0..levels {
        v = Value::Array(vec![v]);
    }
    v
}

#[test]
fn six_levels_of_arrays_inline_fully() {
    insta::assert_snapshot!(
        types_of(nested_array(6)),
        @"type Root = Array<Array<Array<Array<Array<Array<number>>>>>>;"
    );
}

#[test]
fn deeper_arrays_keep_a_residual_wrapper() {
    insta::assert_snapshot!(types_of(nested_array(7)), @r#"
    type Guessed = Array<number>;

    type Root = Array<Array<Array<Array<Array<Array<Guessed>>>>>>;
    "#);
}

#[test]
fn nesting_past_the_limit_is_an_error() {
    let options = GuessOptions { max_depth: 4, ..GuessOptions::default() };
    assert!(guess_with(&nested_array(4), &options).is_ok());
    let err = guess_with(&nested_array(5), &options).unwrap_err();
    assert!(matches!(err, Error::DepthLimitExceeded { limit: 4 }));
}

#[test]
fn pathological_depth_fails_without_overflowing() {
    let err = guess(&nested_array(1_000)).unwrap_err();
    assert!(matches!(err, Error::DepthLimitExceeded { .. }));
}

#[test]
fn primitive_roots_are_rejected() {
    assert!(matches!(guess(&json!("text")).unwrap_err(), Error::PrimitiveRoot(_)));
}

#[test]
fn configured_names_flow_through() {
    let options = GuessOptions {
        root_name: "Payload".into(),
        placeholder_name: "Entry".into(),
        ..GuessOptions::default()
    };
    let types = guess_with(&json!([{"a": 1}]), &options).unwrap();
    insta::assert_snapshot!(render::typescript(&types), @r#"
    type Entry = {
      a: number;
    };

    type Payload = Array<Entry>;
    "#);
}

// ————————————————————————————————————————————————————————————————————————————
// SAMPLES & ISOLATION
// ————————————————————————————————————————————————————————————————————————————

#[test]
fn samples_unify_like_array_children() {
    let samples = [json!({"id": 1, "user": {"name": "a"}}), json!({"id": 2, "extra": null})];
    let types = guess_samples(&samples, &GuessOptions::default()).unwrap();
    insta::assert_snapshot!(render::typescript(&types), @r#"
    type User = {
      name: string;
    };

    type Root = {
      id: number;
      user?: User;
      extra?: null;
    };
    "#);
}

#[test]
fn incompatible_samples_are_an_error() {
    let samples = [json!({"id": 1}), json!([1])];
    let err = guess_samples(&samples, &GuessOptions::default()).unwrap_err();
    assert!(matches!(err, Error::IncompatibleSamples { found: 2 }));
}

#[test]
fn no_samples_is_an_error() {
    let err = guess_samples(&Vec::<Value>::new(), &GuessOptions::default()).unwrap_err();
    assert!(matches!(err, Error::NoSamples));
}

#[test]
fn concurrent_guesses_do_not_interfere() {
    let inputs: Vec<Value> = (0..8)
        .map(|i| json!({ (format!("field{i}")): {"inner": i}, "shared": {"href": "x"} }))
        .collect();
    let expected: Vec<Vec<JsonType>> = inputs.iter().map(|v| guess(v).unwrap()).collect();

    let handles: Vec<_> = inputs
        .into_iter()
        .map(|v| std::thread::spawn(move || guess(&v).unwrap()))
        .collect();
    let actual: Vec<Vec<JsonType>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(actual, expected);
}
