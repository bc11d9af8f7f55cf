//! Primitive topologies and shader stages.

register_enum! {
    /// Primitive topology, as written to `GPUREG_PRIMITIVE_CONFIG` bits 8-9.
    pub enum Primitive {
        Triangles = 0x0000,
        TriangleStrip = 0x0100,
        TriangleFan = 0x0200,
        /// Primitives emitted by the geometry shader
        GeometryPrim = 0x0300,
    }
}

register_enum! {
    /// Programmable shader stage.
    pub enum ShaderType {
        Vertex = 0x0,
        Geometry = 0x1,
    }
}
