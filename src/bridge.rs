//! Renderer bridge.
//!
//! The host page installs a scene object as `window.treeScene`; it owns the
//! meshes, materials and the draw loop. This side only streams transforms and
//! uniforms into it, one packed buffer per layer per frame.

use crate::batch::{self, InstanceRecord};
use crate::constants::SCENE_BRIDGE_GLOBAL;
use fnv::FnvHashMap;
use glam::Quat;
use tree_core::{Camera, Experience, InstanceTransform, LayerKind, RenderSink, Uniform};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    #[derive(Clone, Debug)]
    pub type SceneBridge;

    #[wasm_bindgen(method, js_name = createLayer)]
    pub fn create_layer(this: &SceneBridge, layer: &str, count: u32, colors: &[f32]);

    #[wasm_bindgen(method, js_name = setInstances)]
    pub fn set_instances(this: &SceneBridge, layer: &str, records: &[f32]);

    #[wasm_bindgen(method, js_name = setUniform)]
    pub fn set_uniform(this: &SceneBridge, layer: &str, name: &str, value: f32);

    #[wasm_bindgen(method, js_name = setGroupRotation)]
    pub fn set_group_rotation(this: &SceneBridge, x: f32, y: f32, z: f32, w: f32);

    #[wasm_bindgen(method, js_name = setCamera)]
    pub fn set_camera(this: &SceneBridge, eye: &[f32], orientation: &[f32], fovy: f32, aspect: f32);

    #[wasm_bindgen(method, js_name = setPhotoImage)]
    pub fn set_photo_image(this: &SceneBridge, index: u32, image: &web::HtmlImageElement);

    #[wasm_bindgen(method, js_name = setPhotoPlaceholder)]
    pub fn set_photo_placeholder(this: &SceneBridge, index: u32, color: &[f32], label: &str);

    #[wasm_bindgen(method)]
    pub fn render(this: &SceneBridge);
}

impl SceneBridge {
    pub fn from_window() -> anyhow::Result<SceneBridge> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(SCENE_BRIDGE_GLOBAL))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        if value.is_undefined() || value.is_null() {
            anyhow::bail!("window.{} is not installed", SCENE_BRIDGE_GLOBAL);
        }
        Ok(value.unchecked_into())
    }
}

fn uniform_parts(uniform: Uniform) -> (&'static str, f32) {
    match uniform {
        Uniform::Time(v) => ("time", v),
        Uniform::RevealHeight(v) => ("revealHeight", v),
        Uniform::Brightness(v) => ("brightness", v),
    }
}

/// [`RenderSink`] that forwards into the page's [`SceneBridge`].
pub struct BridgeSink {
    bridge: SceneBridge,
    buffers: FnvHashMap<LayerKind, Vec<InstanceRecord>>,
}

impl BridgeSink {
    pub fn new(bridge: SceneBridge) -> Self {
        Self {
            bridge,
            buffers: FnvHashMap::default(),
        }
    }

    /// Create one renderer layer per driver, sized and colored once.
    pub fn register_layers(&mut self, experience: &Experience) {
        for driver in experience.drivers() {
            let layer = driver.layer();
            let colors = batch::pack_colors(layer.instances.iter().map(|i| i.color));
            self.bridge
                .create_layer(layer.kind.name(), layer.len() as u32, &colors);
            self.buffers
                .insert(layer.kind, Vec::with_capacity(layer.len()));
        }
        log::info!("[scene] registered {} layers", experience.drivers().len());
    }

    pub fn set_camera(&self, camera: &Camera) {
        self.bridge.set_camera(
            &camera.eye.to_array(),
            &camera.orientation.to_array(),
            camera.fovy_radians,
            camera.aspect,
        );
    }

    pub fn render(&self) {
        self.bridge.render();
    }
}

impl RenderSink for BridgeSink {
    fn set_instances(&mut self, layer: LayerKind, transforms: &[InstanceTransform]) {
        let buf = self.buffers.entry(layer).or_default();
        let floats = batch::pack(transforms, buf);
        self.bridge.set_instances(layer.name(), floats);
    }

    fn set_uniform(&mut self, layer: LayerKind, uniform: Uniform) {
        let (name, value) = uniform_parts(uniform);
        self.bridge.set_uniform(layer.name(), name, value);
    }

    fn set_scene_rotation(&mut self, rotation: Quat) {
        self.bridge
            .set_group_rotation(rotation.x, rotation.y, rotation.z, rotation.w);
    }
}
