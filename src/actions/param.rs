//! Action parameter schema and textual encodings.
//!
//! Authored actions carry their parameters as strings. Each action declares a
//! static table of [`Param`]s; [`bind`](crate::actions::bind) checks the
//! supplied strings against it and hands the action a [`BoundParams`] whose
//! typed getters use the encodings below.
//!
//! | kind | encoding | example |
//! |---|---|---|
//! | 2D point / dimension | `x,y` | `3,4` |
//! | 3D point | `x,y,z` | `3,4,5` |
//! | polygon | flat vertex list, ≥ 6 numbers | `0,0,10,0,10,10` |
//! | string pair | `first#second`, `#` omitted when `first` is empty | `hero#pickup` |
//!
//! Compound parsers return `None` for malformed input instead of failing.

use glam::{Vec2, Vec3};
use rustc_hash::FxHashMap;

pub const NUMBER_PARAM_SEPARATOR: char = ',';
pub const STRING_PARAM_SEPARATOR: char = '#';

/// Declared value kind of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Boolean,
    Float,
    Integer,
    Vector2,
    Vector3,
    Dimension,
    Actor,
    Scene,
    Chapter,
    File,
    /// One of the declared options, nothing else.
    Option,
    SceneActor,
    /// `actor#animation`; the actor part may be omitted.
    ActorAnimation,
    Layer,
    /// One of the declared options or any other string.
    EditableOption,
    Text,
    SmallText,
    BigText,
}

/// One entry of an action's parameter schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param {
    pub name: &'static str,
    pub desc: &'static str,
    pub kind: ParamType,
    pub mandatory: bool,
    pub default: Option<&'static str>,
    pub options: &'static [&'static str],
}

impl Param {
    pub const fn new(name: &'static str, desc: &'static str, kind: ParamType) -> Self {
        Self {
            name,
            desc,
            kind,
            mandatory: false,
            default: None,
            options: &[],
        }
    }

    pub const fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub const fn with_default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    pub const fn with_options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }
}

/// Parse `"x,y"`.
pub fn parse_vector2(s: &str) -> Option<Vec2> {
    let (x, y) = s.split_once(NUMBER_PARAM_SEPARATOR)?;
    Some(Vec2::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// Parse `"x,y,z"`.
pub fn parse_vector3(s: &str) -> Option<Vec3> {
    let (x, rest) = s.split_once(NUMBER_PARAM_SEPARATOR)?;
    let (y, z) = rest.rsplit_once(NUMBER_PARAM_SEPARATOR)?;
    Some(Vec3::new(
        x.trim().parse().ok()?,
        y.trim().parse().ok()?,
        z.trim().parse().ok()?,
    ))
}

/// A polygon as a flat vertex list plus a position offset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub vertices: Vec<f32>,
    pub position: Vec2,
}

impl Polygon {
    /// Vertices translated by `position`.
    pub fn world_vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.vertices
            .chunks_exact(2)
            .map(|xy| Vec2::new(xy[0], xy[1]) + self.position)
    }
}

/// Parse a flat vertex list of at least three points.
pub fn parse_polygon(s: &str) -> Option<Polygon> {
    let vertices = s
        .split(NUMBER_PARAM_SEPARATOR)
        .map(|v| v.trim().parse::<f32>().ok())
        .collect::<Option<Vec<f32>>>()?;
    if vertices.len() < 6 {
        return None;
    }
    Some(Polygon {
        vertices,
        position: Vec2::ZERO,
    })
}

/// Parse a vertex list and place it at `pos` (`"x,y"`).
pub fn parse_polygon_at(verts: &str, pos: &str) -> Option<Polygon> {
    let mut polygon = parse_polygon(verts)?;
    polygon.position = parse_vector2(pos)?;
    Some(polygon)
}

/// Split `"first#second"`. Without a separator the whole string is `second`.
pub fn parse_string2(s: &str) -> (Option<&str>, &str) {
    match s.split_once(STRING_PARAM_SEPARATOR) {
        Some((first, second)) => (Some(first), second),
        None => (None, s),
    }
}

/// Authored content writes whole numbers with a trailing `.0` (`3.0`, not `3`).
fn number_param(x: f32) -> String {
    format!("{:?}", x)
}

pub fn vector2_param(v: Vec2) -> String {
    format!(
        "{}{}{}",
        number_param(v.x),
        NUMBER_PARAM_SEPARATOR,
        number_param(v.y)
    )
}

pub fn vector3_param(v: Vec3) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        number_param(v.x),
        number_param(v.y),
        number_param(v.z),
        sep = NUMBER_PARAM_SEPARATOR
    )
}

pub fn polygon_param(p: &Polygon) -> String {
    p.vertices
        .iter()
        .copied()
        .map(number_param)
        .collect::<Vec<_>>()
        .join(",")
}

pub fn string2_param(first: Option<&str>, second: &str) -> String {
    match first {
        Some(first) if !first.is_empty() => {
            format!("{}{}{}", first, STRING_PARAM_SEPARATOR, second)
        }
        _ => second.to_string(),
    }
}

/// Case-insensitive `true` / `false`.
pub fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parameter values that passed validation against a schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParams {
    values: FxHashMap<String, String>,
}

impl BoundParams {
    pub(crate) fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn get_string(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.get_str(name)?.trim().parse().ok()
    }

    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.get_str(name)?.trim().parse().ok()
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        parse_bool(self.get_str(name)?)
    }

    pub fn get_vec2(&self, name: &str) -> Option<Vec2> {
        parse_vector2(self.get_str(name)?)
    }

    pub fn get_vec3(&self, name: &str) -> Option<Vec3> {
        parse_vector3(self.get_str(name)?)
    }

    pub fn get_string2(&self, name: &str) -> Option<(Option<&str>, &str)> {
        self.get_str(name).map(parse_string2)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2() {
        assert_eq!(parse_vector2("3,4"), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(parse_vector2(" -1.5 , 2 "), Some(Vec2::new(-1.5, 2.0)));
        assert_eq!(parse_vector2("3"), None);
        assert_eq!(parse_vector2("a,4"), None);
        assert_eq!(parse_vector2("3,4,5"), None);
    }

    #[test]
    fn test_vector3() {
        assert_eq!(parse_vector3("3,4,5"), Some(Vec3::new(3.0, 4.0, 5.0)));
        assert_eq!(parse_vector3("3,4"), None);
        assert_eq!(parse_vector3("3,x,5"), None);
    }

    #[test]
    fn test_polygon_needs_three_points() {
        assert_eq!(parse_polygon("0,0,10,0"), None);
        assert_eq!(parse_polygon("0,0,10,0,10,x"), None);
        let p = parse_polygon("0,0,10,0,10,10").unwrap();
        assert_eq!(p.vertices.len(), 6);
        assert_eq!(polygon_param(&p), "0.0,0.0,10.0,0.0,10.0,10.0");
    }

    #[test]
    fn test_polygon_at_position() {
        let p = parse_polygon_at("0,0,1,0,1,1", "5,5").unwrap();
        let verts: Vec<Vec2> = p.world_vertices().collect();
        assert_eq!(verts[2], Vec2::new(6.0, 6.0));
        assert_eq!(parse_polygon_at("0,0,1,0,1,1", "bad"), None);
    }

    #[test]
    fn test_string2() {
        assert_eq!(parse_string2("hero#pickup"), (Some("hero"), "pickup"));
        assert_eq!(parse_string2("pickup"), (None, "pickup"));
        assert_eq!(parse_string2("#pickup"), (Some(""), "pickup"));
        assert_eq!(string2_param(Some("hero"), "pickup"), "hero#pickup");
        assert_eq!(string2_param(Some(""), "pickup"), "pickup");
        assert_eq!(string2_param(None, "pickup"), "pickup");
    }

    #[test]
    fn test_encoders() {
        assert_eq!(vector2_param(Vec2::new(3.0, 4.5)), "3.0,4.5");
        assert_eq!(vector2_param(Vec2::new(-0.5, 100.0)), "-0.5,100.0");
        assert_eq!(vector3_param(Vec3::new(1.0, 2.0, 3.0)), "1.0,2.0,3.0");
        assert_eq!(parse_vector2(&vector2_param(Vec2::new(3.0, 4.5))), Some(Vec2::new(3.0, 4.5)));
    }

    #[test]
    fn test_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }
}
