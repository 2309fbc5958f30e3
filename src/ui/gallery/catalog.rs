// SPDX-License-Identifier: MPL-2.0
//! The photo series shown in the gallery.

/// One gallery photo. Identified by its position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// Path relative to the assets directory.
    pub source: &'static str,
    /// Caption shown under the enlarged photo.
    pub alt: &'static str,
}

pub const SERIES: [ImageDescriptor; 19] = [
    ImageDescriptor {
        source: "assets/images/21film-photo-01-vrchat.png",
        alt: "21号胶片作品 01",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-02-vrchat.png",
        alt: "21号胶片作品 02",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-03-vrchat.png",
        alt: "21号胶片作品 03",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-04-vrchat.png",
        alt: "21号胶片作品 04",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-05-vrchat.png",
        alt: "21号胶片作品 05",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-06-vrchat.png",
        alt: "21号胶片作品 06",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-07-vrchat.png",
        alt: "21号胶片作品 07",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-08-vrchat.png",
        alt: "21号胶片作品 08",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-09-vrchat.png",
        alt: "21号胶片作品 09",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-10-vrchat.png",
        alt: "21号胶片作品 10",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-11-vrchat.png",
        alt: "21号胶片作品 11",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-12-vrchat.png",
        alt: "21号胶片作品 12",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-13-vrchat.png",
        alt: "21号胶片作品 13",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-14-vrchat.png",
        alt: "21号胶片作品 14",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-15-vrchat.png",
        alt: "21号胶片作品 15",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-16-vrchat.png",
        alt: "21号胶片作品 16",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-17-vrchat.png",
        alt: "21号胶片作品 17",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-18-vrchat.png",
        alt: "21号胶片作品 18",
    },
    ImageDescriptor {
        source: "assets/images/21film-photo-19-vrchat.png",
        alt: "21号胶片作品 19",
    },
];
