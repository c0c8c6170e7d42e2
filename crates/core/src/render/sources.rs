//! GLSL ES 3.0 sources for the six fixed programs.
//!
//! Attributes and uniforms are bound by name lookup after link, so the
//! sources declare plain `in`/`uniform` names with no layout qualifiers.
//! Lighting constants that never vary (specular exponent, shadow bias,
//! march budget) are baked into the sources; everything per-frame arrives
//! through uniforms.

/// Vertex stage for the solid-lit program: Phong ambient + diffuse +
/// specular evaluated per vertex, red albedo, interpolated to the fragment
/// stage as a finished color.
pub const SOLID_VERTEX: &str = r#"#version 300 es
precision highp float;
in vec3 a_position;
in vec3 a_normal;
uniform mat4 u_model;
uniform mat4 u_projection;
uniform mat3 u_normal_matrix;
uniform vec3 u_light_position;
uniform vec3 u_light_color;
uniform vec3 u_ambient;
out vec3 v_color;
const float SHININESS = 32.0;
const vec3 ALBEDO = vec3(1.0, 0.0, 0.0);
void main() {
    vec4 placed = u_model * vec4(a_position, 1.0);
    vec3 n = normalize(u_normal_matrix * a_normal);
    vec3 to_light = normalize(u_light_position - placed.xyz);
    float diffuse = max(dot(n, to_light), 0.0);
    vec3 to_eye = normalize(-placed.xyz);
    vec3 reflected = reflect(-to_light, n);
    float specular = pow(max(dot(reflected, to_eye), 0.0), SHININESS);
    v_color = u_ambient * ALBEDO + u_light_color * (diffuse * ALBEDO + specular);
    gl_Position = u_projection * placed;
}
"#;

/// Fragment stage for the solid-lit program.
pub const SOLID_FRAGMENT: &str = r#"#version 300 es
precision mediump float;
in vec3 v_color;
out vec4 frag_color;
void main() {
    frag_color = vec4(v_color, 1.0);
}
"#;

/// Shared position-only vertex stage for the flat-colored programs
/// (wireframe, mesh overlay, occlusion probe, shadow depth pre-pass).
pub const FLAT_VERTEX: &str = r#"#version 300 es
precision highp float;
in vec3 a_position;
uniform mat4 u_model;
uniform mat4 u_projection;
void main() {
    gl_Position = u_projection * u_model * vec4(a_position, 1.0);
}
"#;

/// Flat white fragment stage (wireframe lines, occlusion probe).
pub const FLAT_WHITE_FRAGMENT: &str = r#"#version 300 es
precision mediump float;
out vec4 frag_color;
void main() {
    frag_color = vec4(1.0, 1.0, 1.0, 1.0);
}
"#;

/// Flat green fragment stage (mesh triangulation overlay).
pub const FLAT_GREEN_FRAGMENT: &str = r#"#version 300 es
precision mediump float;
out vec4 frag_color;
void main() {
    frag_color = vec4(0.0, 1.0, 0.0, 1.0);
}
"#;

/// Bufferless fullscreen triangle for the ray-march pass.
///
/// Positions and UVs are generated from `gl_VertexID` alone; draw three
/// vertices with an empty vertex array bound and the GPU clips the
/// 2x-oversized triangle to the viewport for free.
pub const RAY_MARCH_VERTEX: &str = r#"#version 300 es
out vec2 v_uv;
void main() {
    v_uv = vec2((gl_VertexID << 1) & 2, gl_VertexID & 2);
    gl_Position = vec4(v_uv * 2.0 - 1.0, 0.0, 1.0);
}
"#;

/// Fragment stage marching a sphere signed-distance field from the camera.
///
/// The ray starts at the view-space origin and steps by the distance bound
/// until it hits the surface (distance below 0.01), travels 100 units, or
/// exhausts 100 steps. Hits are shaded with the same point-light model as
/// the cube and write a projected depth so the sphere composes with the
/// cube under the depth test; misses discard, leaving the background.
pub const RAY_MARCH_FRAGMENT: &str = r#"#version 300 es
precision highp float;
in vec2 v_uv;
uniform float u_aspect;
uniform float u_zoom;
uniform mat4 u_projection;
uniform vec3 u_light_position;
uniform vec3 u_light_color;
uniform vec3 u_ambient;
out vec4 frag_color;
const int MAX_STEPS = 100;
const float MAX_DISTANCE = 100.0;
const float SURFACE_EPSILON = 0.01;
const float SHININESS = 32.0;
const vec3 SPHERE_CENTER = vec3(2.5, 0.0, -6.0);
const float SPHERE_RADIUS = 1.0;
const vec3 ALBEDO = vec3(0.2, 0.4, 0.9);
// tan(fov_y / 2) for a 45 degree field of view.
const float HALF_FOV_TAN = 0.41421356;

float sphere_distance(vec3 p) {
    return length(p - SPHERE_CENTER) - SPHERE_RADIUS;
}

void main() {
    vec2 ndc = v_uv * 2.0 - 1.0;
    float half_height = HALF_FOV_TAN / u_zoom;
    vec3 dir = normalize(vec3(ndc.x * u_aspect * half_height, ndc.y * half_height, -1.0));

    float travelled = 0.0;
    bool hit = false;
    vec3 p = vec3(0.0);
    for (int i = 0; i < MAX_STEPS; i++) {
        p = dir * travelled;
        float d = sphere_distance(p);
        if (d < SURFACE_EPSILON) {
            hit = true;
            break;
        }
        travelled += d;
        if (travelled > MAX_DISTANCE) {
            break;
        }
    }
    if (!hit) {
        discard;
    }

    vec3 n = normalize(p - SPHERE_CENTER);
    vec3 to_light = normalize(u_light_position - p);
    float diffuse = max(dot(n, to_light), 0.0);
    vec3 reflected = reflect(-to_light, n);
    float specular = pow(max(dot(reflected, normalize(-p)), 0.0), SHININESS);
    vec3 color = u_ambient * ALBEDO + u_light_color * (diffuse * ALBEDO + specular);

    vec4 clip = u_projection * vec4(p, 1.0);
    gl_FragDepth = clamp(clip.z / clip.w * 0.5 + 0.5, 0.0, 1.0);
    frag_color = vec4(color, 1.0);
}
"#;

/// Vertex stage for the shadow-PCF program: solid-lit shading plus the
/// light-clip-space position for the depth comparison.
pub const SHADOW_VERTEX: &str = r#"#version 300 es
precision highp float;
in vec3 a_position;
in vec3 a_normal;
uniform mat4 u_model;
uniform mat4 u_projection;
uniform mat4 u_light_matrix;
uniform mat3 u_normal_matrix;
uniform vec3 u_light_position;
uniform vec3 u_light_color;
uniform vec3 u_ambient;
out vec3 v_color;
out vec4 v_light_clip;
const float SHININESS = 32.0;
const vec3 ALBEDO = vec3(1.0, 0.0, 0.0);
void main() {
    vec4 placed = u_model * vec4(a_position, 1.0);
    vec3 n = normalize(u_normal_matrix * a_normal);
    vec3 to_light = normalize(u_light_position - placed.xyz);
    float diffuse = max(dot(n, to_light), 0.0);
    vec3 to_eye = normalize(-placed.xyz);
    vec3 reflected = reflect(-to_light, n);
    float specular = pow(max(dot(reflected, to_eye), 0.0), SHININESS);
    v_color = u_ambient * ALBEDO + u_light_color * (diffuse * ALBEDO + specular);
    v_light_clip = u_light_matrix * placed;
    gl_Position = u_projection * placed;
}
"#;

/// Fragment stage for the shadow-PCF program: a single-tap depth
/// comparison against the shadow map with a fixed bias; fragments deeper
/// than the stored depth are darkened by 0.5.
pub const SHADOW_FRAGMENT: &str = r#"#version 300 es
precision mediump float;
in vec3 v_color;
in vec4 v_light_clip;
uniform sampler2D u_shadow_map;
out vec4 frag_color;
const float BIAS = 0.005;
const float DARKEN = 0.5;
void main() {
    vec3 coords = v_light_clip.xyz / v_light_clip.w * 0.5 + 0.5;
    float lit = 1.0;
    if (coords.x >= 0.0 && coords.x <= 1.0 &&
        coords.y >= 0.0 && coords.y <= 1.0 &&
        coords.z <= 1.0) {
        float stored = texture(u_shadow_map, coords.xy).r;
        if (coords.z >= stored + BIAS) {
            lit = DARKEN;
        }
    }
    frag_color = vec4(v_color * lit, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SOURCES: [(&str, &str); 9] = [
        ("solid vertex", SOLID_VERTEX),
        ("solid fragment", SOLID_FRAGMENT),
        ("flat vertex", FLAT_VERTEX),
        ("flat white fragment", FLAT_WHITE_FRAGMENT),
        ("flat green fragment", FLAT_GREEN_FRAGMENT),
        ("ray-march vertex", RAY_MARCH_VERTEX),
        ("ray-march fragment", RAY_MARCH_FRAGMENT),
        ("shadow vertex", SHADOW_VERTEX),
        ("shadow fragment", SHADOW_FRAGMENT),
    ];

    #[test]
    fn every_source_declares_glsl_es_300() {
        for (name, src) in ALL_SOURCES {
            assert!(
                src.starts_with("#version 300 es"),
                "{name} is missing the version directive"
            );
        }
    }

    #[test]
    fn every_source_has_a_main_function() {
        for (name, src) in ALL_SOURCES {
            assert!(src.contains("void main()"), "{name} has no main function");
        }
    }

    #[test]
    fn ray_march_vertex_is_bufferless() {
        assert!(
            RAY_MARCH_VERTEX.contains("gl_VertexID"),
            "fullscreen triangle must be generated from gl_VertexID"
        );
        assert!(
            !RAY_MARCH_VERTEX.contains("a_position"),
            "fullscreen triangle must not read a vertex buffer"
        );
    }

    #[test]
    fn ray_march_budget_matches_engine_config() {
        use crate::config;
        assert!(RAY_MARCH_FRAGMENT
            .contains(&format!("MAX_STEPS = {}", config::RAY_MARCH_MAX_STEPS)));
        assert!(RAY_MARCH_FRAGMENT.contains("MAX_DISTANCE = 100.0"));
        assert!(RAY_MARCH_FRAGMENT.contains("SURFACE_EPSILON = 0.01"));
    }

    #[test]
    fn ray_march_fragment_writes_depth_or_discards() {
        assert!(RAY_MARCH_FRAGMENT.contains("gl_FragDepth"));
        assert!(RAY_MARCH_FRAGMENT.contains("discard"));
    }

    #[test]
    fn shadow_fragment_uses_configured_bias_and_darken() {
        assert!(SHADOW_FRAGMENT.contains("BIAS = 0.005"));
        assert!(SHADOW_FRAGMENT.contains("DARKEN = 0.5"));
        assert!(SHADOW_FRAGMENT.contains("u_shadow_map"));
    }

    #[test]
    fn lit_stages_share_the_point_light_uniforms() {
        for (name, src) in [
            ("solid vertex", SOLID_VERTEX),
            ("shadow vertex", SHADOW_VERTEX),
            ("ray-march fragment", RAY_MARCH_FRAGMENT),
        ] {
            for uniform in ["u_light_position", "u_light_color", "u_ambient"] {
                assert!(src.contains(uniform), "{name} is missing {uniform}");
            }
        }
    }

    #[test]
    fn solid_albedo_is_red() {
        assert!(SOLID_VERTEX.contains("ALBEDO = vec3(1.0, 0.0, 0.0)"));
    }

    #[test]
    fn flat_fragments_are_white_and_green() {
        assert!(FLAT_WHITE_FRAGMENT.contains("vec4(1.0, 1.0, 1.0, 1.0)"));
        assert!(FLAT_GREEN_FRAGMENT.contains("vec4(0.0, 1.0, 0.0, 1.0)"));
    }

    #[test]
    fn specular_exponent_matches_config() {
        use crate::config;
        let expected = format!("SHININESS = {:.1}", config::SPECULAR_EXPONENT);
        assert!(SOLID_VERTEX.contains(&expected));
        assert!(SHADOW_VERTEX.contains(&expected));
        assert!(RAY_MARCH_FRAGMENT.contains(&expected));
    }
}
