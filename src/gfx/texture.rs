//! Render targets sized to the surface

/// View of a surface-sized texture that a render pass attaches.
///
/// The view keeps its texture alive.
pub struct RenderTarget {
    pub view: wgpu::TextureView,
}

impl RenderTarget {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Depth buffer with the surface's dimensions and the pass's sample count
    pub fn depth(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> Self {
        Self::create(device, config, Self::DEPTH_FORMAT, sample_count, "Depth")
    }

    /// Multisampled color buffer that resolves into the swapchain image
    pub fn multisampled_color(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> Self {
        Self::create(device, config, config.format, sample_count, "MSAA Color")
    }

    fn create(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        format: wgpu::TextureFormat,
        sample_count: u32,
        label: &str,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { view }
    }
}
