use super::result::{ParamValue, Parameters};
use crate::metadata::{ArgShape, REST_PARAMETER};

/// Bind `args` against the first shape that accepts them.
///
/// Shapes are scanned in declaration order and scanning stops at the first acceptance, even
/// when a later shape would also match. Returns the index of the chosen shape with its
/// bindings.
#[must_use]
pub fn match_shape(shapes: &[ArgShape], args: &[String]) -> Option<(usize, Parameters)> {
    shapes
        .iter()
        .position(|shape| shape.accepts(args.len()))
        .map(|index| (index, bind(&shapes[index], args)))
}

/// Bind raw arguments to a shape that accepts them.
///
/// A named slot at `i` takes `args[i]`; a rest slot at `i` takes `args[i..]` as a list
/// under [`REST_PARAMETER`]. No arguments bind to an empty map.
#[must_use]
pub fn bind(shape: &ArgShape, args: &[String]) -> Parameters {
    let mut parameters = Parameters::new();
    if args.is_empty() {
        return parameters;
    }
    for (index, slot) in shape.slots().iter().enumerate() {
        match slot {
            Some(name) => {
                if let Some(value) = args.get(index) {
                    parameters.insert(name.clone(), ParamValue::Single(value.clone()));
                }
            }
            None => {
                let rest = args.get(index..).unwrap_or(&[]).to_vec();
                parameters.insert(REST_PARAMETER.to_string(), ParamValue::List(rest));
            }
        }
    }
    parameters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_first_match_wins() {
        let shapes = vec![
            ArgShape::named(&["a", "b"]),
            ArgShape::new(vec![None]),
        ];
        let (index, params) = match_shape(&shapes, &args(&["1", "2"])).unwrap();
        assert_eq!(index, 0);
        assert_eq!(params.get("a"), Some(&ParamValue::from("1")));
        assert_eq!(params.get("b"), Some(&ParamValue::from("2")));
        assert!(!params.contains_key("args"));
    }

    #[test]
    fn test_rest_slot_absorbs_overflow() {
        let shapes = vec![ArgShape::new(vec![None])];
        let (_, params) = match_shape(&shapes, &args(&["a", "b", "c"])).unwrap();
        assert_eq!(
            params.get("args").and_then(ParamValue::as_list),
            Some(args(&["a", "b", "c"]).as_slice())
        );
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_named_then_rest() {
        let shape = ArgShape::new(vec![Some("id".to_string()), None]);
        let params = bind(&shape, &args(&["7", "x", "y"]));
        assert_eq!(params.get("id").and_then(ParamValue::as_str), Some("7"));
        assert_eq!(
            params.get("args").and_then(ParamValue::as_list),
            Some(args(&["x", "y"]).as_slice())
        );
    }

    #[test]
    fn test_empty_shape_only_matches_no_args() {
        let shapes = vec![ArgShape::empty()];
        assert_eq!(match_shape(&shapes, &[]), Some((0, Parameters::new())));
        assert_eq!(match_shape(&shapes, &args(&["x"])), None);
    }

    #[test]
    fn test_rest_slot_needs_at_least_shape_len() {
        let shapes = vec![ArgShape::new(vec![Some("id".to_string()), None])];
        assert!(match_shape(&shapes, &args(&["1"])).is_none());
        let (_, params) = match_shape(&shapes, &args(&["1", "2"])).unwrap();
        assert_eq!(
            params.get("args").and_then(ParamValue::as_list),
            Some(args(&["2"]).as_slice())
        );
    }
}
