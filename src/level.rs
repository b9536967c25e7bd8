//! Level definitions
//!
//! A level file is a grid of brick codes, one row per line:
//! `0` is empty, `1` is a solid brick, `2`-`5` are colored breakable bricks.
//! The grid is stretched to fill the level area exactly.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};

use crate::render::Sprite;
use crate::sim::Entity;

/// Brick color for a grid code
pub fn brick_color(code: u32) -> Vec3 {
    match code {
        1 => Vec3::new(0.8, 0.8, 0.7),
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => Vec3::ONE,
    }
}

/// Errors while reading a level definition
#[derive(Debug)]
pub enum LevelError {
    /// The file could not be read
    Io { path: PathBuf, source: std::io::Error },
    /// A cell is not a non-negative integer
    InvalidTile {
        line: usize,
        column: usize,
        token: String,
    },
    /// A row's length differs from the first row's
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// No rows at all
    Empty,
    /// A session was started without any levels
    NoLevels,
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io { path, source } => {
                write!(f, "failed to read level {}: {}", path.display(), source)
            }
            LevelError::InvalidTile {
                line,
                column,
                token,
            } => write!(f, "invalid tile {token:?} at line {line}, column {column}"),
            LevelError::RaggedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "row at line {line} has {found} tiles, expected {expected}"
            ),
            LevelError::Empty => write!(f, "level has no rows"),
            LevelError::NoLevels => write!(f, "no levels to play"),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Rectangular grid of brick codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrickGrid {
    rows: Vec<Vec<u32>>,
}

impl BrickGrid {
    /// Parse whitespace-separated codes; blank lines are skipped
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut rows: Vec<Vec<u32>> = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let row = raw
                .split_whitespace()
                .enumerate()
                .map(|(col, token)| {
                    token.parse::<u32>().map_err(|_| LevelError::InvalidTile {
                        line,
                        column: col + 1,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if row.is_empty() {
                continue;
            }
            let expected = rows.first().map_or(row.len(), Vec::len);
            if row.len() != expected {
                return Err(LevelError::RaggedRow {
                    line,
                    expected,
                    found: row.len(),
                });
            }
            rows.push(row);
        }
        if rows.is_empty() {
            return Err(LevelError::Empty);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.rows[0].len()
    }

    /// Lay out bricks to fill `width` x `height`, row by row
    pub fn build_bricks(&self, width: f32, height: f32) -> Vec<Entity> {
        let unit = Vec2::new(width / self.columns() as f32, height / self.rows() as f32);
        let mut bricks = Vec::new();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                if code == 0 {
                    continue;
                }
                let pos = unit * Vec2::new(x as f32, y as f32);
                let solid = code == 1;
                let sprite = if solid {
                    Sprite::BlockSolid
                } else {
                    Sprite::Block
                };
                let mut brick = Entity::new(pos, unit, sprite).with_color(brick_color(code));
                brick.solid = solid;
                bricks.push(brick);
            }
        }
        bricks
    }
}

/// A playable level: its grid plus the live bricks built from it
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub bricks: Vec<Entity>,
    grid: BrickGrid,
    size: Vec2,
}

impl Level {
    pub fn new(name: impl Into<String>, grid: BrickGrid, width: f32, height: f32) -> Self {
        let bricks = grid.build_bricks(width, height);
        Self {
            name: name.into(),
            bricks,
            grid,
            size: Vec2::new(width, height),
        }
    }

    /// Parse a level from text
    pub fn parse(
        name: impl Into<String>,
        text: &str,
        width: f32,
        height: f32,
    ) -> Result<Self, LevelError> {
        Ok(Self::new(name, BrickGrid::parse(text)?, width, height))
    }

    /// Read and parse a level file
    pub fn load(path: &Path, width: f32, height: f32) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let level = Self::parse(name, &text, width, height)?;
        log::info!(
            "Loaded level {} ({}x{}, {} bricks)",
            level.name,
            level.grid.columns(),
            level.grid.rows(),
            level.bricks.len()
        );
        Ok(level)
    }

    pub fn grid(&self) -> &BrickGrid {
        &self.grid
    }

    /// Rebuild every brick from the grid
    pub fn reset(&mut self) {
        self.bricks = self.grid.build_bricks(self.size.x, self.size.y);
    }

    /// True once every breakable brick is destroyed
    pub fn is_completed(&self) -> bool {
        self.bricks.iter().all(|b| b.solid || b.destroyed)
    }
}
