use super::Serializer;

use autoscope_core::Metadata;

#[derive(Debug)]
pub(super) enum Flavor {
    Postgresql,
    Sqlite,
    Mysql,
}

impl<'a> Serializer<'a> {
    pub fn sqlite(metadata: &'a dyn Metadata) -> Serializer<'a> {
        Serializer {
            metadata,
            flavor: Flavor::Sqlite,
        }
    }

    pub fn postgresql(metadata: &'a dyn Metadata) -> Serializer<'a> {
        Serializer {
            metadata,
            flavor: Flavor::Postgresql,
        }
    }

    pub fn mysql(metadata: &'a dyn Metadata) -> Serializer<'a> {
        Serializer {
            metadata,
            flavor: Flavor::Mysql,
        }
    }
}
