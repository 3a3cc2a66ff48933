//! Asset acquisition
//!
//! Decoding and GPU upload belong to the graphics collaborator behind
//! `AssetLoader`. This module knows which assets the face needs, which of them
//! are optional, and how to hand them back at shutdown.

use std::path::{Path, PathBuf};

use crate::error::{InitError, LoadError};
use crate::renderer::TextureHandle;
use crate::renderer::instance::{QUAD_INDICES, QUAD_VERTICES, QuadVertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u32);

/// Every texture the face samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    ArrowLeft,
    ArrowRight,
    Heart,
    Ekg,
    BatteryFrame,
    Colon,
    Percent,
    IdBadge,
    Warning,
    Digit(u8),
}

impl TextureId {
    /// Path relative to the asset root
    pub fn path(&self) -> PathBuf {
        let name = match self {
            TextureId::ArrowLeft => "arrow_left".to_string(),
            TextureId::ArrowRight => "arrow_right".to_string(),
            TextureId::Heart => "heart".to_string(),
            TextureId::Ekg => "ekg".to_string(),
            TextureId::BatteryFrame => "battery_frame".to_string(),
            TextureId::Colon => "colon".to_string(),
            TextureId::Percent => "percent".to_string(),
            TextureId::IdBadge => "id_overlay".to_string(),
            TextureId::Warning => "warning_full".to_string(),
            TextureId::Digit(n) => n.to_string(),
        };
        Path::new("res").join(format!("{name}.png"))
    }

    /// Missing optional textures fall back to a flat rectangle instead of failing startup
    pub fn is_optional(&self) -> bool {
        matches!(self, TextureId::Warning)
    }
}

/// Shader programs the face draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderId {
    Basic,
    Battery,
}

impl ShaderId {
    /// (vertex, fragment) paths relative to the asset root
    pub fn stages(&self) -> (PathBuf, PathBuf) {
        let fragment = match self {
            ShaderId::Basic => "basic.frag",
            ShaderId::Battery => "battery.frag",
        };
        (
            Path::new("shaders").join("basic.vert"),
            Path::new("shaders").join(fragment),
        )
    }
}

/// Graphics collaborator that turns asset files into GPU handles
pub trait AssetLoader {
    fn load_shader(&mut self, vertex: &Path, fragment: &Path) -> Result<ShaderHandle, LoadError>;

    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, LoadError>;

    fn create_quad_geometry(
        &mut self,
        vertices: &[QuadVertex],
        indices: &[u16],
    ) -> Result<GeometryHandle, LoadError>;

    fn release_geometry(&mut self, handle: GeometryHandle);
}

/// Texture handles resolved at startup
#[derive(Debug, Clone, PartialEq)]
pub struct TextureSet {
    pub arrow_left: TextureHandle,
    pub arrow_right: TextureHandle,
    pub heart: TextureHandle,
    pub ekg: TextureHandle,
    pub battery_frame: TextureHandle,
    pub colon: TextureHandle,
    pub percent: TextureHandle,
    pub id_badge: TextureHandle,
    pub digits: [TextureHandle; 10],
    /// Absent when the warning image failed to load
    pub warning: Option<TextureHandle>,
}

impl TextureSet {
    /// Load every texture; any required failure is fatal
    pub fn load(loader: &mut dyn AssetLoader, root: &Path) -> Result<Self, InitError> {
        let mut required = |id: TextureId| {
            loader
                .load_texture(&root.join(id.path()))
                .map_err(|source| InitError::Texture { id, source })
        };

        let arrow_left = required(TextureId::ArrowLeft)?;
        let arrow_right = required(TextureId::ArrowRight)?;
        let heart = required(TextureId::Heart)?;
        let ekg = required(TextureId::Ekg)?;
        let battery_frame = required(TextureId::BatteryFrame)?;
        let colon = required(TextureId::Colon)?;
        let percent = required(TextureId::Percent)?;
        let id_badge = required(TextureId::IdBadge)?;

        let mut digits = [TextureHandle(0); 10];
        for (n, slot) in digits.iter_mut().enumerate() {
            *slot = required(TextureId::Digit(n as u8))?;
        }

        let warning = match loader.load_texture(&root.join(TextureId::Warning.path())) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("Warning image unavailable, using flat overlay: {e}");
                None
            }
        };

        Ok(Self {
            arrow_left,
            arrow_right,
            heart,
            ekg,
            battery_frame,
            colon,
            percent,
            id_badge,
            digits,
            warning,
        })
    }

    /// Glyph for a single decimal digit
    pub fn digit(&self, n: u32) -> TextureHandle {
        self.digits[(n % 10) as usize]
    }
}

/// Everything acquired at startup and owned until shutdown
#[derive(Debug, Clone, PartialEq)]
pub struct FaceResources {
    pub basic_shader: ShaderHandle,
    pub battery_shader: ShaderHandle,
    pub geometry: GeometryHandle,
    pub textures: TextureSet,
}

impl FaceResources {
    pub fn acquire(loader: &mut dyn AssetLoader, root: &Path) -> Result<Self, InitError> {
        let mut shader = |id: ShaderId| {
            let (vertex, fragment) = id.stages();
            loader
                .load_shader(&root.join(vertex), &root.join(fragment))
                .map_err(InitError::Shader)
        };
        let basic_shader = shader(ShaderId::Basic)?;
        let battery_shader = shader(ShaderId::Battery)?;

        let geometry = loader
            .create_quad_geometry(&QUAD_VERTICES, &QUAD_INDICES)
            .map_err(InitError::Geometry)?;

        let textures = match TextureSet::load(loader, root) {
            Ok(textures) => textures,
            Err(e) => {
                loader.release_geometry(geometry);
                return Err(e);
            }
        };

        Ok(Self {
            basic_shader,
            battery_shader,
            geometry,
            textures,
        })
    }

    /// Hand owned geometry back to the collaborator
    pub fn release(self, loader: &mut dyn AssetLoader) {
        loader.release_geometry(self.geometry);
    }
}

/// Loader for running without a GPU: issues sequential handles, optionally
/// requiring each file to exist under the asset root
#[derive(Debug, Default)]
pub struct HeadlessLoader {
    verify_files: bool,
    next_handle: u32,
    live_geometry: Vec<GeometryHandle>,
}

impl HeadlessLoader {
    pub fn new(verify_files: bool) -> Self {
        Self {
            verify_files,
            next_handle: 1,
            live_geometry: Vec::new(),
        }
    }

    /// Geometry created but not yet released
    pub fn live_geometry(&self) -> &[GeometryHandle] {
        &self.live_geometry
    }

    fn check(&self, path: &Path) -> Result<(), LoadError> {
        if self.verify_files && !path.is_file() {
            return Err(LoadError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn issue(&mut self) -> u32 {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }
}

impl AssetLoader for HeadlessLoader {
    fn load_shader(&mut self, vertex: &Path, fragment: &Path) -> Result<ShaderHandle, LoadError> {
        self.check(vertex)?;
        self.check(fragment)?;
        Ok(ShaderHandle(self.issue()))
    }

    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, LoadError> {
        self.check(path)?;
        Ok(TextureHandle(self.issue()))
    }

    fn create_quad_geometry(
        &mut self,
        vertices: &[QuadVertex],
        indices: &[u16],
    ) -> Result<GeometryHandle, LoadError> {
        if indices.iter().any(|&i| i as usize >= vertices.len()) {
            return Err(LoadError::Geometry("index out of range".into()));
        }
        let handle = GeometryHandle(self.issue());
        self.live_geometry.push(handle);
        Ok(handle)
    }

    fn release_geometry(&mut self, handle: GeometryHandle) {
        self.live_geometry.retain(|&h| h != handle);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Loader that fails for the listed paths (matched by suffix)
    pub(crate) struct FailingLoader {
        pub inner: HeadlessLoader,
        pub fail_suffixes: Vec<&'static str>,
    }

    impl FailingLoader {
        pub fn new(fail_suffixes: Vec<&'static str>) -> Self {
            Self {
                inner: HeadlessLoader::new(false),
                fail_suffixes,
            }
        }

        fn fails(&self, path: &Path) -> bool {
            self.fail_suffixes.iter().any(|s| path.ends_with(s))
        }
    }

    impl AssetLoader for FailingLoader {
        fn load_shader(
            &mut self,
            vertex: &Path,
            fragment: &Path,
        ) -> Result<ShaderHandle, LoadError> {
            if self.fails(fragment) {
                return Err(LoadError::Shader {
                    vertex: vertex.to_path_buf(),
                    fragment: fragment.to_path_buf(),
                    reason: "compile error".into(),
                });
            }
            self.inner.load_shader(vertex, fragment)
        }

        fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, LoadError> {
            if self.fails(path) {
                return Err(LoadError::MissingFile {
                    path: path.to_path_buf(),
                });
            }
            self.inner.load_texture(path)
        }

        fn create_quad_geometry(
            &mut self,
            vertices: &[QuadVertex],
            indices: &[u16],
        ) -> Result<GeometryHandle, LoadError> {
            self.inner.create_quad_geometry(vertices, indices)
        }

        fn release_geometry(&mut self, handle: GeometryHandle) {
            self.inner.release_geometry(handle);
        }
    }

    #[test]
    fn test_texture_paths() {
        assert_eq!(TextureId::Digit(7).path(), Path::new("res/7.png"));
        assert_eq!(TextureId::IdBadge.path(), Path::new("res/id_overlay.png"));
        assert_eq!(
            ShaderId::Battery.stages(),
            (PathBuf::from("shaders/basic.vert"), PathBuf::from("shaders/battery.frag"))
        );
    }

    #[test]
    fn test_acquire_and_release() {
        let mut loader = HeadlessLoader::new(false);
        let resources = FaceResources::acquire(&mut loader, Path::new("assets")).unwrap();
        assert!(resources.textures.warning.is_some());
        assert_eq!(loader.live_geometry().len(), 1);

        // Handles are distinct
        let t = &resources.textures;
        assert_ne!(t.digit(0), t.digit(1));
        assert_eq!(t.digit(13), t.digit(3));

        resources.release(&mut loader);
        assert!(loader.live_geometry().is_empty());
    }

    #[test]
    fn test_missing_required_texture_is_fatal() {
        let mut loader = FailingLoader::new(vec!["res/ekg.png"]);
        let err = FaceResources::acquire(&mut loader, Path::new(".")).unwrap_err();
        assert!(matches!(err, InitError::Texture { id: TextureId::Ekg, .. }));
        // Geometry created before the failure is handed back
        assert!(loader.inner.live_geometry().is_empty());
    }

    #[test]
    fn test_missing_shader_is_fatal() {
        let mut loader = FailingLoader::new(vec!["shaders/battery.frag"]);
        let err = FaceResources::acquire(&mut loader, Path::new(".")).unwrap_err();
        assert!(matches!(err, InitError::Shader(LoadError::Shader { .. })));
    }

    #[test]
    fn test_missing_warning_texture_degrades() {
        let mut loader = FailingLoader::new(vec!["res/warning_full.png"]);
        let resources = FaceResources::acquire(&mut loader, Path::new(".")).unwrap();
        assert_eq!(resources.textures.warning, None);
    }

    #[test]
    fn test_verified_loader_rejects_missing_files() {
        let mut loader = HeadlessLoader::new(true);
        let err = loader
            .load_texture(Path::new("definitely/not/here.png"))
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingFile { .. }));
    }
}
