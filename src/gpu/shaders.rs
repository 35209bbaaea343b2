//! WGSL sources of the viewer pipelines.
//!
//! Both modules share the uniform block declared in [`UNIFORMS_WGSL`], which
//! must match `gpu::Uniforms` byte for byte.

/// Shared uniform block, prepended to every shader.
pub const UNIFORMS_WGSL: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    view: mat4x4<f32>,
    world_offset: vec4<f32>,
    camera_position: vec4<f32>,
    ambient: vec4<f32>,
    viewport: vec2<f32>,
    time: f32,
    _padding: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;
"#;

/// Foliage billboards: depth-attenuated size, soft round glow.
pub const POINT_WGSL: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) alpha: f32,
    @location(2) point_coord: vec2<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) position: vec3<f32>,
    @location(1) size: f32,
    @location(2) color: vec3<f32>,
    @location(3) alpha: f32,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );
    let quad_pos = quad_vertices[vertex_index];

    let world_pos = vec4<f32>(position + uniforms.world_offset.xyz, 1.0);
    let view_pos = uniforms.view * world_pos;
    var clip_pos = uniforms.view_proj * world_pos;

    // point diameter in pixels shrinks with view depth
    let pixels = size / max(-view_pos.z, 0.1);
    let offset = quad_pos * pixels / uniforms.viewport * clip_pos.w;
    clip_pos.x += offset.x;
    clip_pos.y += offset.y;

    var out: VertexOutput;
    out.clip_position = clip_pos;
    out.color = color;
    out.alpha = alpha;
    out.point_coord = quad_pos * 0.5 + vec2<f32>(0.5, 0.5);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.point_coord - vec2<f32>(0.5, 0.5));
    if dist > 0.5 {
        discard;
    }
    let strength = pow(1.0 - dist * 2.0, 1.5);
    return vec4<f32>(in.color, in.alpha * strength);
}
"#;

/// Instanced lit meshes. `fs_emissive` draws the topper unlit and overbright.
pub const MESH_WGSL: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
) -> VertexOutput {
    let model = mat4x4<f32>(model_0, model_1, model_2, model_3);
    let world_pos = model * vec4<f32>(position, 1.0) + vec4<f32>(uniforms.world_offset.xyz, 0.0);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_position = world_pos.xyz;
    out.normal = normalize((model * vec4<f32>(normal, 0.0)).xyz);
    out.color = color;
    return out;
}

fn point_light(
    light_pos: vec3<f32>,
    light_color: vec3<f32>,
    intensity: f32,
    pos: vec3<f32>,
    n: vec3<f32>,
    v: vec3<f32>,
    base: vec3<f32>,
) -> vec3<f32> {
    let to_light = light_pos - pos;
    let dist = length(to_light);
    let l = to_light / dist;
    let h = normalize(l + v);
    let attenuation = intensity / (1.0 + dist * dist * 0.01);
    let diffuse = max(dot(n, l), 0.0) * base * 0.2;
    // metallic highlight takes the surface tint
    let specular = pow(max(dot(n, h), 0.0), 96.0) * base * 3.0;
    return (diffuse + specular) * light_color * attenuation;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let v = normalize(uniforms.camera_position.xyz - in.world_position);
    let base = in.color.rgb;

    var lit = base * uniforms.ambient.rgb;
    lit += point_light(vec3<f32>(10.0, 20.0, 10.0), vec3<f32>(1.0, 0.98, 0.93), 2.0, in.world_position, n, v, base);
    lit += point_light(vec3<f32>(-10.0, 5.0, -10.0), vec3<f32>(0.0, 0.26, 0.15), 0.5, in.world_position, n, v, base);
    lit += point_light(vec3<f32>(0.0, -5.0, 5.0), vec3<f32>(1.0, 0.75, 0.0), 0.3, in.world_position, n, v, base);

    // environment fill and rim
    let rim = pow(1.0 - max(dot(n, v), 0.0), 3.0);
    lit += base * (0.08 + rim * 0.4);

    return vec4<f32>(lit, in.color.a);
}

@fragment
fn fs_emissive(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color.rgb * 2.0, in.color.a);
}
"#;

/// Full point shader source.
pub fn point_shader() -> String {
    format!("{UNIFORMS_WGSL}{POINT_WGSL}")
}

/// Full mesh shader source.
pub fn mesh_shader() -> String {
    format!("{UNIFORMS_WGSL}{MESH_WGSL}")
}
