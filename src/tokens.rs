//! Closed enumeration tables and their external string tokens.
//!
//! Every enumeration serializes as its token in both serde and XML output.
//! `as_str` is total; `FromStr` is the partial reverse lookup and rejects
//! anything outside the table with [`UnknownTokenError`]; the external
//! schema is closed, so there is no catch-all variant.

#[cfg(doc)]
use crate::error::UnknownTokenError;

macro_rules! token_table {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every value of the enumeration, in table order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// External token for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token, )+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::UnknownTokenError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $( $token => Ok($name::$variant), )+
                    other => Err($crate::error::UnknownTokenError::new(stringify!($name), other)),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let value = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                value.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use token_table;

token_table! {
    /// Whether an element describes a template or a concrete instance.
    ///
    /// `Instance` is the default and is never written out explicitly.
    ModelingKind {
        Template => "Template",
        Instance => "Instance",
    }
}

impl Default for ModelingKind {
    fn default() -> Self {
        ModelingKind::Instance
    }
}

token_table! {
    /// Whether an asset is a type or an instance of a type.
    AssetKind {
        Type => "Type",
        Instance => "Instance",
    }
}

impl Default for AssetKind {
    fn default() -> Self {
        AssetKind::Instance
    }
}

token_table! {
    /// Element types a reference key may point at.
    ///
    /// All values except `GlobalReference` and `FragmentReference` are also
    /// schema element types an entity can resolve to.
    KeyElements {
        Asset => "Asset",
        AssetAdministrationShell => "AssetAdministrationShell",
        ConceptDescription => "ConceptDescription",
        Submodel => "Submodel",
        AnnotatedRelationshipElement => "AnnotatedRelationshipElement",
        BasicEvent => "BasicEvent",
        Blob => "Blob",
        Capability => "Capability",
        ConceptDictionary => "ConceptDictionary",
        DataElement => "DataElement",
        Entity => "Entity",
        Event => "Event",
        File => "File",
        MultiLanguageProperty => "MultiLanguageProperty",
        Operation => "Operation",
        Property => "Property",
        Range => "Range",
        ReferenceElement => "ReferenceElement",
        RelationshipElement => "RelationshipElement",
        SubmodelElement => "SubmodelElement",
        SubmodelElementCollection => "SubmodelElementCollection",
        View => "View",
        GlobalReference => "GlobalReference",
        FragmentReference => "FragmentReference",
    }
}

impl KeyElements {
    /// True for keys that only ever appear inside references.
    pub fn is_reference_only(&self) -> bool {
        matches!(
            self,
            KeyElements::GlobalReference | KeyElements::FragmentReference
        )
    }

    /// Local element name used when an entity of this type is wrapped in a
    /// document, e.g. `Submodel` -> `submodel`.
    pub fn element_name(&self) -> String {
        let token = self.as_str();
        let mut chars = token.chars();
        match chars.next() {
            Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

token_table! {
    /// Format of a reference key value.
    KeyType {
        Custom => "Custom",
        Irdi => "IRDI",
        Iri => "IRI",
        IdShort => "IdShort",
        FragmentId => "FragmentId",
    }
}

token_table! {
    /// Format of an Identifiable's identification.
    IdentifierType {
        Custom => "Custom",
        Irdi => "IRDI",
        Iri => "IRI",
    }
}

token_table! {
    /// Whether an entity is managed together with its asset.
    EntityType {
        CoManaged => "CoManagedEntity",
        SelfManaged => "SelfManagedEntity",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_match_schema_names() {
        assert_eq!(ModelingKind::Template.as_str(), "Template");
        assert_eq!(AssetKind::Type.as_str(), "Type");
        assert_eq!(KeyType::FragmentId.as_str(), "FragmentId");
        assert_eq!(IdentifierType::Irdi.as_str(), "IRDI");
        assert_eq!(EntityType::SelfManaged.as_str(), "SelfManagedEntity");
        assert_eq!(
            KeyElements::AnnotatedRelationshipElement.as_str(),
            "AnnotatedRelationshipElement"
        );
        assert_eq!(KeyElements::ALL.len(), 24);
        assert_eq!(
            KeyElements::ALL
                .iter()
                .filter(|k| !k.is_reference_only())
                .count(),
            22
        );
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        let err = "Iri".parse::<IdentifierType>().unwrap_err();
        assert_eq!(err.enumeration, "IdentifierType");
        assert_eq!(err.token, "Iri");
        assert!("instance".parse::<ModelingKind>().is_err());
        assert!("".parse::<KeyElements>().is_err());
    }

    #[test]
    fn serde_uses_tokens() {
        let json = serde_json::to_string(&EntityType::CoManaged).unwrap();
        assert_eq!(json, "\"CoManagedEntity\"");
        let back: EntityType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EntityType::CoManaged);

        let err = serde_json::from_str::<KeyType>("\"URN\"").unwrap_err();
        assert!(err.to_string().contains("unknown KeyType token 'URN'"));
    }

    #[test]
    fn element_names_are_lower_camel() {
        assert_eq!(KeyElements::Submodel.element_name(), "submodel");
        assert_eq!(
            KeyElements::AssetAdministrationShell.element_name(),
            "assetAdministrationShell"
        );
    }

    #[test]
    fn kinds_default_to_instance() {
        assert_eq!(ModelingKind::default(), ModelingKind::Instance);
        assert_eq!(AssetKind::default(), AssetKind::Instance);
    }
}
