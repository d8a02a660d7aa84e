/// WGSL shader for the lit objects: Lambert diffuse plus ambient from one
/// point light. `vs_sphere` takes its colour from the object uniform,
/// `vs_drill` from the vertex.
pub const LIT_SHADER: &str = r#"
struct SceneUniforms {
    view_proj: mat4x4<f32>,
    light_pos: vec4<f32>,
    light_color: vec4<f32>,
    view_pos: vec4<f32>,
};

struct ItemUniforms {
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    color: vec4<f32>,
    material: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;

@group(1) @binding(0)
var<uniform> item: ItemUniforms;

struct SphereInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct DrillInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec3<f32>,
};

fn lit_vertex(position: vec3<f32>, normal: vec3<f32>, color: vec3<f32>) -> VertexOutput {
    let world = item.model * vec4<f32>(position, 1.0);

    var out: VertexOutput;
    out.clip_position = scene.view_proj * world;
    out.world_pos = world.xyz;
    out.world_normal = (item.normal_matrix * vec4<f32>(normal, 0.0)).xyz;
    out.color = color;
    return out;
}

@vertex
fn vs_sphere(vertex: SphereInput) -> VertexOutput {
    return lit_vertex(vertex.position, vertex.normal, item.color.rgb);
}

@vertex
fn vs_drill(vertex: DrillInput) -> VertexOutput {
    return lit_vertex(vertex.position, vertex.normal, vertex.color);
}

@fragment
fn fs_lit(in: VertexOutput) -> @location(0) vec4<f32> {
    let ambient = item.material.x * scene.light_color.rgb;
    let norm = normalize(in.world_normal);
    let light_dir = normalize(scene.light_pos.xyz - in.world_pos);
    let diffuse = max(dot(norm, light_dir), 0.0) * scene.light_color.rgb;
    return vec4<f32>((ambient + diffuse) * in.color, 1.0);
}
"#;

/// WGSL shader for the unlit lamp marker.
pub const LAMP_SHADER: &str = r#"
struct SceneUniforms {
    view_proj: mat4x4<f32>,
    light_pos: vec4<f32>,
    light_color: vec4<f32>,
    view_pos: vec4<f32>,
};

struct ItemUniforms {
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    color: vec4<f32>,
    material: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;

@group(1) @binding(0)
var<uniform> item: ItemUniforms;

@vertex
fn vs_lamp(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return scene.view_proj * item.model * vec4<f32>(position, 1.0);
}

@fragment
fn fs_lamp() -> @location(0) vec4<f32> {
    return item.color;
}
"#;
