//! Work gallery entries served to the site

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub client: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub year: String,
    pub description: String,
    pub image: String,
}

impl Project {
    fn new(
        id: &str,
        client: &str,
        title: &str,
        kind: &str,
        year: &str,
        description: &str,
        image: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            client: client.to_string(),
            title: title.to_string(),
            kind: kind.to_string(),
            year: year.to_string(),
            description: description.to_string(),
            image: image.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl Default for ProjectCatalog {
    fn default() -> Self {
        Self::new(vec![
            Project::new(
                "01",
                "AURORA PROPERTIES",
                "LUMINAL RESIDENCE",
                "WEB ARCHITECTURE",
                "2024",
                "A digital experience designed to mirror the fluidity of high-end real estate, focusing on spatial navigation and light-play.",
                "https://images.unsplash.com/photo-1600607687920-4e2a09cf159d?q=80&w=2670&auto=format&fit=crop",
            ),
            Project::new(
                "02",
                "NEON VENTURES",
                "CRYPTO ATELIER",
                "BLOCKCHAIN INTERFACE",
                "2023",
                "Developing a visual language for decentralized finance that prioritizes clarity, security, and architectural precision.",
                "https://images.unsplash.com/photo-1639762681485-074b7f938ba0?q=80&w=2232&auto=format&fit=crop",
            ),
            Project::new(
                "03",
                "STUDIO KINETIC",
                "MOTION REEL",
                "IMMERSIVE SHOWCASE",
                "2024",
                "An experimental folio utilizing physics-based interactions to showcase global motion design excellence.",
                "https://images.unsplash.com/photo-1550745165-9bc0b252726f?q=80&w=2670&auto=format&fit=crop",
            ),
            Project::new(
                "04",
                "VELVET & CO",
                "MAISON DE LUXE",
                "E-COMMERCE SYSTEM",
                "2024",
                "A high-fashion commerce platform where every transition is choreographed to feel like a boutique fitting.",
                "https://images.unsplash.com/photo-1441986300917-64674bd600d8?q=80&w=2670&auto=format&fit=crop",
            ),
            Project::new(
                "05",
                "TERRA FIRMA",
                "LANDSCAPE GENOME",
                "DATA VISUALIZATION",
                "2023",
                "Transforming complex environmental data into a readable, beautiful architectural blueprint.",
                "https://images.unsplash.com/photo-1449156003053-c30670b96835?q=80&w=2670&auto=format&fit=crop",
            ),
        ])
    }
}
