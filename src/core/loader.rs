use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
    convert::TryFrom,
};

/// Generic key/value property store used to construct scene objects.
///
/// Getters record which keys were consumed so `check_unused_keys` can warn
/// about typos; a failed getter leaves the entry untouched and available
/// for reinterpretation under another type.
pub struct InputParams {
    params: HashMap<String, InputParamsValue>,
    name: Cow<'static, str>,
    visited_names: HashSet<String>,
}

pub enum InputParamsValue {
    Int(i32),
    Float(f32),
    Bool(bool),
    String(String),
    Array(Vec<InputParamsValue>),
}

/// Result of a type-tagged lookup for entries that may hold either a
/// literal 3D point or a reference to a named scene object. A structurally
/// valid point takes precedence over a reference.
#[derive(Debug, Clone, PartialEq)]
pub enum PointOrRef {
    Point([f32; 3]),
    Reference(String),
}

macro_rules! params_get {
    ( $( ( $name:ident, $type:ty, $variant:ident, $hint:expr ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[allow(dead_code)]
                pub fn [<get_ $name>](&mut self, key: &str) -> anyhow::Result<$type> {
                    if let Some(value) = self.params.get(key) {
                        if let InputParamsValue::$variant(value) = value {
                            self.visited_names.insert(key.to_owned());
                            return Ok(*value);
                        }
                        anyhow::bail!(format!("{} - '{}' should be {}", self.name, key, $hint));
                    }
                    anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
                }

                #[allow(dead_code)]
                pub fn [<get_ $name _or>](&mut self, key: &str, fallback: $type) -> $type {
                    if let Ok(value) = self.[<get_ $name>](key) {
                        value
                    } else {
                        fallback
                    }
                }
            }
        )+
    };
}

macro_rules! params_get_vec {
    ( $( ( $name:ident, $type:ty, $len:expr, $variant:ident, $hint:expr ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[allow(dead_code)]
                pub fn [<get_ $name>](&mut self, key: &str) -> anyhow::Result<[$type; $len]> {
                    if let Some(value) = self.params.get(key) {
                        let error_info = format!(
                            "{} - '{}' should be array with {} {}s",
                            self.name,
                            key,
                            $len,
                            $hint,
                        );
                        if let InputParamsValue::Array(arr) = value {
                            if arr.len() == $len {
                                let mut result = [$type::default(); $len];
                                for i in 0..$len {
                                    if let InputParamsValue::$variant(ele) = arr[i] {
                                        result[i] = ele;
                                    } else {
                                        anyhow::bail!(error_info.clone());
                                    }
                                }
                                self.visited_names.insert(key.to_owned());
                                return Ok(result);
                            }
                        }
                        anyhow::bail!(error_info);
                    }
                    anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
                }

                #[allow(dead_code)]
                pub fn [<get_ $name _or>](
                    &mut self,
                    key: &str,
                    fallback: [$type; $len],
                ) -> [$type; $len] {
                    if let Ok(value) = self.[<get_ $name>](key) {
                        value
                    } else {
                        fallback
                    }
                }
            }
        )+
    };
}

impl InputParams {
    pub fn set_name(&mut self, name: Cow<'static, str>) {
        self.name = name;
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    params_get! {
        (int, i32, Int, "integer"),
        (float, f32, Float, "float"),
        (bool, bool, Bool, "boolean"),
    }

    params_get_vec! {
        (int2, i32, 2, Int, "integer"),
        (float3, f32, 3, Float, "float"),
    }

    #[allow(dead_code)]
    pub fn get_str(&mut self, key: &str) -> anyhow::Result<String> {
        if let Some(value) = self.params.get(key) {
            if let InputParamsValue::String(value) = value {
                self.visited_names.insert(key.to_owned());
                return Ok(value.clone());
            }
            anyhow::bail!(format!("{} - '{}' should be string", self.name, key));
        }
        anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
    }

    #[allow(dead_code)]
    pub fn get_str_or(&mut self, key: &str, fallback: &str) -> String {
        if let Ok(value) = self.get_str(key) {
            value
        } else {
            fallback.to_owned()
        }
    }

    #[allow(dead_code)]
    pub fn get_matrix(&mut self, key: &str) -> anyhow::Result<glam::Mat4> {
        if let Some(value) = self.params.get(key) {
            if let InputParamsValue::Array(arr) = value {
                let error_info =
                    format!("{} - '{}' should be an array of 16 floats", self.name, key);
                if arr.len() == 16 {
                    let mut matrix = glam::Mat4::IDENTITY;
                    for i in 0..16 {
                        if let InputParamsValue::Float(ele) = arr[i] {
                            let col_num = i / 4;
                            match i % 4 {
                                0 => matrix.col_mut(col_num).x = ele,
                                1 => matrix.col_mut(col_num).y = ele,
                                2 => matrix.col_mut(col_num).z = ele,
                                3 => matrix.col_mut(col_num).w = ele,
                                _ => panic!("unreachable match arm"),
                            }
                        } else {
                            anyhow::bail!(error_info.clone());
                        }
                    }
                    self.visited_names.insert(key.to_owned());
                    return Ok(matrix);
                }
                anyhow::bail!(error_info);
            }
            anyhow::bail!(format!("{} - '{}' should be an array", self.name, key));
        }
        anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
    }

    /// Looks up an entry that may be a literal point ([x, y, z]) or a
    /// reference to a named object (string). When the value is an array of
    /// 3 floats it is a point, otherwise a string is a reference; anything
    /// else is an error.
    pub fn get_point_or_reference(&mut self, key: &str) -> anyhow::Result<PointOrRef> {
        if let Ok(point) = self.get_float3(key) {
            return Ok(PointOrRef::Point(point));
        }
        if let Ok(reference) = self.get_str(key) {
            return Ok(PointOrRef::Reference(reference));
        }
        anyhow::bail!(format!(
            "{} - '{}' should be a point or an object reference",
            self.name, key
        ));
    }

    pub fn check_unused_keys(&self) {
        for k in self.params.keys() {
            if !k.starts_with('#') && !self.visited_names.contains(k) {
                log::warn!("{} - unused key '{}'", self.name, k);
            }
        }
    }
}

impl TryFrom<&serde_json::Value> for InputParamsValue {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => {
                anyhow::bail!("can't convert to InputParamsValue from null json")
            }
            serde_json::Value::Bool(v) => Ok(Self::Bool(*v)),
            serde_json::Value::Number(v) => {
                if let Some(v) = v.as_i64() {
                    Ok(Self::Int(v as i32))
                } else {
                    Ok(Self::Float(v.as_f64().unwrap() as f32))
                }
            }
            serde_json::Value::String(v) => Ok(Self::String(v.clone())),
            serde_json::Value::Array(arr) => {
                let mut values = Vec::<InputParamsValue>::with_capacity(arr.len());
                for v in arr {
                    match Self::try_from(v) {
                        Ok(v) => values.push(v),
                        Err(e) => {
                            anyhow::bail!(format!("can't convert array element: {}", e))
                        }
                    }
                }
                Ok(Self::Array(values))
            }
            serde_json::Value::Object(_) => {
                anyhow::bail!("can't convert to InputParamsValue from object json")
            }
        }
    }
}

impl TryFrom<&serde_json::Value> for InputParams {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        if let serde_json::Value::Object(value) = value {
            let mut params = HashMap::<String, InputParamsValue>::with_capacity(value.len());
            for (k, v) in value {
                match InputParamsValue::try_from(v) {
                    Ok(v) => {
                        params.insert(k.clone(), v);
                    }
                    Err(e) => {
                        anyhow::bail!(format!("can't convert member '{}': {}", k, e))
                    }
                }
            }
            Ok(Self {
                params,
                name: Cow::Owned("".to_owned()),
                visited_names: HashSet::new(),
            })
        } else {
            anyhow::bail!("can't convert to InputParams from non-object json value");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryInto;

    fn params_from(json: &str) -> InputParams {
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        (&value).try_into().unwrap()
    }

    #[test]
    fn test_typed_getters() {
        let mut params = params_from(r#"{ "radius": 2.5, "count": 3, "name": "ball" }"#);
        assert_eq!(params.get_float("radius").unwrap(), 2.5);
        assert_eq!(params.get_int("count").unwrap(), 3);
        assert_eq!(params.get_str("name").unwrap(), "ball");
        assert!(params.get_float("missing").is_err());
        assert_eq!(params.get_float_or("missing", 1.0), 1.0);
    }

    #[test]
    fn test_point_takes_precedence_over_reference() {
        let mut params = params_from(r#"{ "ray_target": [1.0, 2.0, 3.0] }"#);
        assert_eq!(
            params.get_point_or_reference("ray_target").unwrap(),
            PointOrRef::Point([1.0, 2.0, 3.0])
        );

        let mut params = params_from(r#"{ "ray_target": "plate" }"#);
        assert_eq!(
            params.get_point_or_reference("ray_target").unwrap(),
            PointOrRef::Reference("plate".to_owned())
        );
    }

    #[test]
    fn test_failed_probe_keeps_entry_available() {
        let mut params = params_from(r#"{ "ray_target": "plate" }"#);
        // The point probe fails but must not consume the entry.
        assert!(params.get_float3("ray_target").is_err());
        assert_eq!(
            params.get_str("ray_target").unwrap(),
            "plate".to_owned()
        );
    }

    #[test]
    fn test_matrix_parses_float_elements() {
        let mut params = params_from(
            r#"{ "to_world": [
                2.0, 0.0, 0.0, 0.0,
                0.0, 2.0, 0.0, 0.0,
                0.0, 0.0, 2.0, 0.0,
                0.0, 0.0, 0.0, 1.0
            ] }"#,
        );
        let matrix = params.get_matrix("to_world").unwrap();
        assert_eq!(matrix, glam::Mat4::from_scale(glam::Vec3::splat(2.0)));
    }

    #[test]
    fn test_matrix_rejects_non_float_elements() {
        // Integer literals parse as Int and must not fall back to the
        // identity entries.
        let mut params = params_from(
            r#"{ "to_world": [
                2, 0, 0, 0,
                0, 2, 0, 0,
                0, 0, 2, 0,
                0, 0, 0, 1
            ] }"#,
        );
        assert!(params.get_matrix("to_world").is_err());
    }

    #[test]
    fn test_neither_point_nor_reference_is_an_error() {
        let mut params = params_from(r#"{ "ray_target": true }"#);
        assert!(params.get_point_or_reference("ray_target").is_err());
    }
}
