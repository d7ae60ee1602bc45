//! Build-configurator artifact metadata for LWJGL 3.0.0.

use serde::{Deserialize, Serialize};

/// Native platform an artifact ships binaries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativePlatform {
    Windows,
    Macos,
    Linux,
}

pub const NATIVE_WIN: NativePlatform = NativePlatform::Windows;
pub const NATIVE_ALL: &[NativePlatform] = &[
    NativePlatform::Windows,
    NativePlatform::Macos,
    NativePlatform::Linux,
];

/// One selectable artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Empty for pure-Java artifacts.
    pub natives: &'static [NativePlatform],
    pub required: bool,
}

impl Artifact {
    const fn java(id: &'static str, title: &'static str, description: &'static str) -> Self {
        Self {
            id,
            title,
            description,
            natives: &[],
            required: false,
        }
    }

    const fn native(
        id: &'static str,
        title: &'static str,
        description: &'static str,
        natives: &'static [NativePlatform],
    ) -> Self {
        Self {
            id,
            title,
            description,
            natives,
            required: false,
        }
    }

    pub fn has_natives(&self) -> bool {
        !self.natives.is_empty()
    }
}

/// Artifacts available for one release, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactTable {
    version: &'static str,
    artifacts: Vec<Artifact>,
}

impl ArtifactTable {
    pub fn version(&self) -> &str {
        self.version
    }

    pub fn get(&self, id: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|artifact| artifact.id == id)
    }

    pub fn all_ids(&self) -> Vec<&'static str> {
        self.artifacts.iter().map(|artifact| artifact.id).collect()
    }

    pub fn required(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().filter(|artifact| artifact.required)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// LWJGL 3.0.0 artifact table.
pub fn lwjgl_3_0_0() -> ArtifactTable {
    let core = Artifact {
        id: "lwjgl",
        title: "LWJGL core",
        description: "The LWJGL core library.",
        natives: NATIVE_ALL,
        required: true,
    };

    ArtifactTable {
        version: "3.0.0",
        artifacts: vec![
            core,
            Artifact::java(
                "lwjgl-egl",
                "EGL bindings",
                "An interface between Khronos rendering APIs such as OpenGL ES or OpenVG and the underlying native platform window system.",
            ),
            Artifact::native(
                "lwjgl-glfw",
                "GLFW bindings",
                "An multi-platform library for OpenGL, OpenGL ES and Vulkan development on the desktop. It provides a simple API for creating windows, contexts and surfaces, receiving input and events.",
                NATIVE_ALL,
            ),
            Artifact::java("lwjgl-jawt", "JAWT bindings", "The AWT native interface."),
            Artifact::native(
                "lwjgl-jemalloc",
                "jemalloc bindings",
                "A general purpose malloc implementation that emphasizes fragmentation avoidance and scalable concurrency support.",
                NATIVE_ALL,
            ),
            Artifact::native(
                "lwjgl-nanovg",
                "NanoVG bindings",
                "A small antialiased vector graphics rendering library for OpenGL.",
                NATIVE_ALL,
            ),
            Artifact::native(
                "lwjgl-nfd",
                "Native File Dialog bindings",
                "A tiny, neat C library that portably invokes native file open and save dialogs.",
                NATIVE_ALL,
            ),
            Artifact::native(
                "lwjgl-openal",
                "OpenAL bindings",
                "A cross-platform 3D audio API appropriate for use with gaming applications and many other types of audio applications.",
                NATIVE_ALL,
            ),
            Artifact::java(
                "lwjgl-opencl",
                "OpenCL bindings",
                "An open, royalty-free standard for cross-platform, parallel programming of diverse processors found in personal computers, servers, mobile devices and embedded platforms.",
            ),
            Artifact::java(
                "lwjgl-opengl",
                "OpenGL bindings",
                "The most widely adopted 2D and 3D graphics API in the industry, bringing thousands of applications to a wide variety of computer platforms.",
            ),
            Artifact::java(
                "lwjgl-opengles",
                "OpenGL ES bindings",
                "A royalty-free, cross-platform API for full-function 2D and 3D graphics on embedded systems - including consoles, phones, appliances and vehicles.",
            ),
            Artifact::native(
                "lwjgl-ovr",
                "OVR bindings",
                "The API of the Oculus SDK.",
                &[NATIVE_WIN],
            ),
            Artifact::native(
                "lwjgl-par",
                "par_shapes bindings",
                "Generate parametric surfaces and other simple shapes.",
                NATIVE_ALL,
            ),
            Artifact::native("lwjgl-sse", "SSE bindings", "Simple SSE intrinsics.", NATIVE_ALL),
            Artifact::native(
                "lwjgl-stb",
                "stb bindings",
                "Single-file public domain libraries for fonts, images, ogg vorbis files and more.",
                NATIVE_ALL,
            ),
            Artifact::java(
                "lwjgl-vulkan",
                "Vulkan bindings",
                "A new generation graphics and compute API that provides high-efficiency, cross-platform access to modern GPUs used in a wide variety of devices from PCs and consoles to mobile phones and embedded platforms.",
            ),
            Artifact::native(
                "lwjgl-xxhash",
                "xxHash bindings",
                "An Extremely fast Hash algorithm, running at RAM speed limits.",
                NATIVE_ALL,
            ),
        ],
    }
}
