use std::borrow::Cow;

use wgpu::naga::ShaderStage;

/// Compiles the pass-through vertex shader for the textured quad.
pub(crate) fn compile_vertex_shader(device: &wgpu::Device) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("overlay quad vertex"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(VERTEX_SHADER_GLSL),
            stage: ShaderStage::Vertex,
            defines: &[],
        },
    })
}

/// Compiles the texture-sampling fragment shader.
///
/// With `premultiply` set the sampled colour is multiplied by its alpha before
/// output, which is what premultiplied-alpha compositors expect.
pub(crate) fn compile_fragment_shader(device: &wgpu::Device, premultiply: bool) -> wgpu::ShaderModule {
    let defines: &[(&str, &str)] = if premultiply {
        &[("PREMULTIPLY_ALPHA", "1")]
    } else {
        &[]
    };
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("overlay quad fragment"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(FRAGMENT_SHADER_GLSL),
            stage: ShaderStage::Fragment,
            defines,
        },
    })
}

const VERTEX_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec2 a_position;
layout(location = 1) in vec2 a_tex_coords;
layout(location = 0) out vec2 v_uv;

void main() {
    v_uv = a_tex_coords;
    gl_Position = vec4(a_position, 0.0, 1.0);
}
";

const FRAGMENT_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 outColor;

layout(set = 0, binding = 0) uniform texture2D overlay_texture;
layout(set = 0, binding = 1) uniform sampler overlay_sampler;

void main() {
    vec4 color = texture(sampler2D(overlay_texture, overlay_sampler), v_uv);
#ifdef PREMULTIPLY_ALPHA
    color.rgb *= color.a;
#endif
    outColor = color;
}
";
