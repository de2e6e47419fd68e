// Vocabulary, level layouts and tutorial scripts.
use bevy::prelude::*;

use crate::matching::{Item, MatchBoard, Zone};
use crate::screens::{LevelId, Screens};
use crate::tutorial::{GuideTarget, GuideVariant, ScriptStep, TutorialScript};

pub const HOME_SCRIPT: TutorialScript = TutorialScript(&[
    ScriptStep {
        step: 1,
        target: GuideTarget::Greeting,
        message: "¡Hola! Soy Tuki el Tucán. ¡Voy a enseñarte cómo usar la aplicación para aprender BriBri!",
        anchor: [62.0, 18.0],
    },
    ScriptStep {
        step: 2,
        target: GuideTarget::PlayButton,
        message: "Presiona el botón \"Jugar\" para comenzar a aprender BriBri con diversos niveles interactivos.",
        anchor: [30.0, 32.0],
    },
    ScriptStep {
        step: 3,
        target: GuideTarget::SettingsButton,
        message: "Si quieres activar o desactivar mi ayuda, puedes usar el botón de configuración aquí arriba.",
        anchor: [15.0, 15.0],
    },
    ScriptStep {
        step: 4,
        target: GuideTarget::InfoButtons,
        message: "Aquí abajo encontrarás las instrucciones del juego, los créditos y el manual original de BriBri.",
        anchor: [50.0, 58.0],
    },
    ScriptStep {
        step: 5,
        target: GuideTarget::Resting,
        message: "¡Estaré aquí para ayudarte durante tu aprendizaje! Tócame si necesitas ayuda. ¡Vamos a aprender BriBri juntos!",
        anchor: [62.0, 18.0],
    },
]);

pub const LEVEL_MAP_SCRIPT: TutorialScript = TutorialScript(&[
    ScriptStep {
        step: 1,
        target: GuideTarget::Greeting,
        message: "¡Bienvenido al mapa de niveles! Aquí eliges qué aprender.",
        anchor: [62.0, 18.0],
    },
    ScriptStep {
        step: 2,
        target: GuideTarget::LevelButtons,
        message: "Empieza por la guía para escuchar las palabras y luego juega los niveles.",
        anchor: [55.0, 40.0],
    },
    ScriptStep {
        step: 3,
        target: GuideTarget::BackButton,
        message: "Con este botón vuelves a la pantalla principal.",
        anchor: [12.0, 12.0],
    },
    ScriptStep {
        step: 4,
        target: GuideTarget::Resting,
        message: "¡Mucha suerte! Tócame si necesitas ayuda.",
        anchor: [62.0, 18.0],
    },
]);

pub const LISTEN_LEVEL_SCRIPT: TutorialScript = TutorialScript(&[
    ScriptStep {
        step: 1,
        target: GuideTarget::Greeting,
        message: "¡Vamos a escuchar! Une cada sonido con su lugar en la casa.",
        anchor: [62.0, 12.0],
    },
    ScriptStep {
        step: 2,
        target: GuideTarget::Zones,
        message: "Toca un recuadro de color en la imagen para escogerlo.",
        anchor: [40.0, 30.0],
    },
    ScriptStep {
        step: 3,
        target: GuideTarget::AudioItems,
        message: "Ahora toca los audios de abajo hasta encontrar la palabra correcta.",
        anchor: [30.0, 60.0],
    },
    ScriptStep {
        step: 4,
        target: GuideTarget::Resting,
        message: "Cuando completes todos, podrás pasar al siguiente nivel.",
        anchor: [62.0, 12.0],
    },
]);

pub const HOME_GUIDE: GuideVariant = GuideVariant {
    script: HOME_SCRIPT,
    retain_on_refocus: true,
    honours_completion: false,
    rest_anchor: [62.0, 18.0],
};

pub const LEVEL_MAP_GUIDE: GuideVariant = GuideVariant {
    script: LEVEL_MAP_SCRIPT,
    retain_on_refocus: false,
    honours_completion: true,
    rest_anchor: [62.0, 18.0],
};

pub const LISTEN_LEVEL_GUIDE: GuideVariant = GuideVariant {
    script: LISTEN_LEVEL_SCRIPT,
    retain_on_refocus: false,
    honours_completion: false,
    rest_anchor: [62.0, 12.0],
};

/// A zone plus where it sits on the level picture, in percent.
#[derive(Debug, Clone, Copy)]
pub struct ZoneLayout {
    pub zone: Zone,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct ListenLevel {
    pub id: LevelId,
    pub title: &'static str,
    pub background: &'static str,
    pub zones: &'static [ZoneLayout],
    pub items: &'static [Item],
    pub next: Screens,
}

impl ListenLevel {
    pub fn board(&self) -> MatchBoard {
        MatchBoard::new(
            self.zones.iter().map(|layout| layout.zone),
            self.items.iter().copied(),
        )
    }
}

const fn zone(
    id: &'static str,
    match_key: &'static str,
    left: f32,
    top: f32,
    color: Color,
) -> ZoneLayout {
    ZoneLayout {
        zone: Zone { id, match_key },
        left,
        top,
        width: 8.0,
        height: 8.0,
        color,
    }
}

pub const LISTEN_LEVEL_ONE: ListenLevel = ListenLevel {
    id: LevelId::One,
    title: "I: Alrededor de la casa",
    background: "images/guia1.jpeg",
    zones: &[
        zone("obj_ale", "ale", 24.0, 38.0, Color::srgb(1.0, 0.0, 0.0)),
        zone("obj_nolo_nkuo", "nolo_nkuo", 9.0, 66.0, Color::srgb(1.0, 1.0, 0.0)),
        zone("obj_kapo", "kapo", 53.0, 62.0, Color::srgb(1.0, 0.65, 0.0)),
        zone("obj_nolo_kibi", "nolo_kibi", 42.0, 70.0, Color::srgb(0.0, 1.0, 0.0)),
    ],
    items: &[
        Item {
            key: "nolo_nkuo",
            audio: "audio/nolo_nkuo_caminito_de_la_casa.wav",
        },
        Item {
            key: "nolo_kibi",
            audio: "audio/nolo_kibi_camino_antes_de_la_casa.wav",
        },
        Item {
            key: "ale",
            audio: "audio/ale_alero.wav",
        },
        Item {
            key: "kapo",
            audio: "audio/kapo_hamaca.wav",
        },
    ],
    next: Screens::Level(LevelId::Three),
};

pub const LISTEN_LEVEL_THREE: ListenLevel = ListenLevel {
    id: LevelId::Three,
    title: "III: Dentro de la casa",
    background: "images/guia3juego.png",
    zones: &[
        zone("obj_u_tto", "u_tto", 9.0, 60.0, Color::srgb(0.894, 0.098, 0.110)),
        zone("obj_uko", "uko", 65.4, 67.0, Color::srgb(0.914, 0.302, 0.122)),
        zone(
            "obj_u_tso_pabakok",
            "u_tso_pabakok",
            70.0,
            29.0,
            Color::srgb(0.0, 0.275, 0.890),
        ),
        zone("obj_u_tsi", "u_tsi", 50.0, 61.0, Color::srgb(0.902, 0.090, 0.361)),
        zone("obj_pabakok", "pabakok", 32.0, 17.0, Color::srgb(0.929, 0.894, 0.188)),
        zone("obj_etsok", "etsok", 11.0, 27.0, Color::srgb(0.408, 0.878, 0.200)),
    ],
    // Three words still share the u_tsi recording.
    items: &[
        Item {
            key: "u_tto",
            audio: "audio/utto.wav",
        },
        Item {
            key: "uko",
            audio: "audio/uko.wav",
        },
        Item {
            key: "u_tso_pabakok",
            audio: "audio/utsi.wav",
        },
        Item {
            key: "u_tsi",
            audio: "audio/utsi.wav",
        },
        Item {
            key: "pabakok",
            audio: "audio/utsi.wav",
        },
        Item {
            key: "etsok",
            audio: "audio/etsok.wav",
        },
    ],
    next: Screens::LevelMap,
};

impl LevelId {
    pub fn level(self) -> &'static ListenLevel {
        match self {
            LevelId::One => &LISTEN_LEVEL_ONE,
            LevelId::Three => &LISTEN_LEVEL_THREE,
        }
    }
}

/// Audio boxes on the listening guide picture: (left %, top %, clip).
pub const GUIDE_BOXES: &[(f32, f32, &str)] = &[
    (24.0, 38.0, "audio/ale_alero.wav"),
    (9.0, 66.0, "audio/nolo_nkuo_caminito_de_la_casa.wav"),
    (53.0, 62.0, "audio/kapo_hamaca.wav"),
    (42.0, 70.0, "audio/nolo_kibi_camino_antes_de_la_casa.wav"),
];

pub const INSTRUCTIONS_TITLE: &str = "Instrucciones";
pub const INSTRUCTIONS: &[&str] = &[
    "Selecciona un modo de aprendizaje, luego elige un nivel.",
    "Empareja las palabras con las imágenes correctas para completar cada nivel.",
];

pub const CREDITS_TITLE: &str = "Créditos";
pub const CREDITS: &[&str] = &[
    "Desarrollado para el aprendizaje de la lengua BriBri.",
    "",
    "Basado en el Diccionario de la Casa Tradicional BriBri",
    "de la Universidad de Costa Rica.",
];

pub const MANUAL_TITLE: &str = "Manual Original BriBri";
pub const MANUAL: &[&str] = &[
    "Diccionario de la Casa Tradicional BriBri",
    "Universidad de Costa Rica",
    "",
    "Este manual contiene el vocabulario tradicional BriBri relacionado con la casa y sus elementos.",
    "https://www.dipalicori.ucr.ac.cr/wp-content/uploads/Diccionario_casa_tradicional_bribri.pdf",
    "",
    "Vocabulario incluido en la app:",
    "• alè - alero",
    "• ñolö nkuö - caminito de la casa",
    "• kapö - hamaca",
    "• ñolö kibí - camino antes de la casa",
    "• tso klowok - puerta",
    "• shkéki - ventana",
    "• y muchas más...",
];

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn scripts_are_numbered_from_one_without_gaps() {
        for script in [HOME_SCRIPT, LEVEL_MAP_SCRIPT, LISTEN_LEVEL_SCRIPT] {
            for (index, entry) in script.0.iter().enumerate() {
                assert_eq!(usize::from(entry.step), index + 1);
            }
            assert!((4..=6).contains(&script.final_step()));
            assert_eq!(script.0[0].target, GuideTarget::Greeting);
            assert_eq!(script.0[script.0.len() - 1].target, GuideTarget::Resting);
        }
    }

    #[test]
    fn home_tour_points_at_its_controls_in_order() {
        assert_eq!(HOME_SCRIPT.designated_step(GuideTarget::PlayButton), Some(2));
        assert_eq!(HOME_SCRIPT.designated_step(GuideTarget::SettingsButton), Some(3));
        assert_eq!(HOME_SCRIPT.designated_step(GuideTarget::InfoButtons), Some(4));
        assert_eq!(HOME_SCRIPT.final_step(), 5);
    }

    #[test]
    fn every_zone_has_exactly_one_item() {
        for id in LevelId::iter() {
            let level = id.level();
            assert_eq!(level.id, id);
            assert_eq!(level.zones.len(), level.items.len());
            for layout in level.zones {
                let matching = level
                    .items
                    .iter()
                    .filter(|item| item.key == layout.zone.match_key)
                    .count();
                assert_eq!(matching, 1, "zone {}", layout.zone.id);
            }
        }
    }

    #[test]
    fn levels_lead_somewhere_else() {
        for id in LevelId::iter() {
            assert_ne!(id.level().next, Screens::Level(id));
        }
    }
}
