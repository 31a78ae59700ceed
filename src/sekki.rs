//! The 24 solar terms (二十四節気) and 72 micro-seasons (七十二候).
//!
//! Solar terms are 15° bands of apparent solar longitude starting at the vernal equinox (0°).
//! Each term is split into three 5° micro-seasons. The micro-season table follows the
//! traditional order, which starts at 立春 (315°), so its index is
//! `floor(((λ − 315) mod 360) / 5)`.

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::math::normalize_degrees_0_to_360;

/// Width of a solar term band in degrees.
pub const TERM_WIDTH: f64 = 15.0;

/// Width of a micro-season band in degrees.
pub const MICRO_SEASON_WIDTH: f64 = 5.0;

/// Solar longitude at which the traditional sequence (立春) begins.
const SEQUENCE_ORIGIN: f64 = 315.0;

/// One of the 24 solar terms, in order of solar longitude from the vernal equinox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SolarTerm {
    /// 春分 (0°)
    VernalEquinox,
    /// 清明 (15°)
    ClearAndBright,
    /// 穀雨 (30°)
    GrainRain,
    /// 立夏 (45°)
    StartOfSummer,
    /// 小満 (60°)
    GrainBuds,
    /// 芒種 (75°)
    GrainInEar,
    /// 夏至 (90°)
    SummerSolstice,
    /// 小暑 (105°)
    MinorHeat,
    /// 大暑 (120°)
    MajorHeat,
    /// 立秋 (135°)
    StartOfAutumn,
    /// 処暑 (150°)
    EndOfHeat,
    /// 白露 (165°)
    WhiteDew,
    /// 秋分 (180°)
    AutumnalEquinox,
    /// 寒露 (195°)
    ColdDew,
    /// 霜降 (210°)
    FrostDescent,
    /// 立冬 (225°)
    StartOfWinter,
    /// 小雪 (240°)
    MinorSnow,
    /// 大雪 (255°)
    MajorSnow,
    /// 冬至 (270°)
    WinterSolstice,
    /// 小寒 (285°)
    MinorCold,
    /// 大寒 (300°)
    MajorCold,
    /// 立春 (315°)
    StartOfSpring,
    /// 雨水 (330°)
    RainWater,
    /// 啓蟄 (345°)
    AwakeningOfInsects,
}

/// (kanji, reading, English)
const TERM_NAMES: [(&str, &str, &str); 24] = [
    ("春分", "しゅんぶん", "Vernal Equinox"),
    ("清明", "せいめい", "Clear and Bright"),
    ("穀雨", "こくう", "Grain Rain"),
    ("立夏", "りっか", "Start of Summer"),
    ("小満", "しょうまん", "Grain Buds"),
    ("芒種", "ぼうしゅ", "Grain in Ear"),
    ("夏至", "げし", "Summer Solstice"),
    ("小暑", "しょうしょ", "Minor Heat"),
    ("大暑", "たいしょ", "Major Heat"),
    ("立秋", "りっしゅう", "Start of Autumn"),
    ("処暑", "しょしょ", "End of Heat"),
    ("白露", "はくろ", "White Dew"),
    ("秋分", "しゅうぶん", "Autumnal Equinox"),
    ("寒露", "かんろ", "Cold Dew"),
    ("霜降", "そうこう", "Frost's Descent"),
    ("立冬", "りっとう", "Start of Winter"),
    ("小雪", "しょうせつ", "Minor Snow"),
    ("大雪", "たいせつ", "Major Snow"),
    ("冬至", "とうじ", "Winter Solstice"),
    ("小寒", "しょうかん", "Minor Cold"),
    ("大寒", "だいかん", "Major Cold"),
    ("立春", "りっしゅん", "Start of Spring"),
    ("雨水", "うすい", "Rain Water"),
    ("啓蟄", "けいちつ", "Awakening of Insects"),
];

impl SolarTerm {
    /// All terms in order of solar longitude.
    pub const ALL: [Self; 24] = [
        Self::VernalEquinox,
        Self::ClearAndBright,
        Self::GrainRain,
        Self::StartOfSummer,
        Self::GrainBuds,
        Self::GrainInEar,
        Self::SummerSolstice,
        Self::MinorHeat,
        Self::MajorHeat,
        Self::StartOfAutumn,
        Self::EndOfHeat,
        Self::WhiteDew,
        Self::AutumnalEquinox,
        Self::ColdDew,
        Self::FrostDescent,
        Self::StartOfWinter,
        Self::MinorSnow,
        Self::MajorSnow,
        Self::WinterSolstice,
        Self::MinorCold,
        Self::MajorCold,
        Self::StartOfSpring,
        Self::RainWater,
        Self::AwakeningOfInsects,
    ];

    /// Finds the term whose band `[start, start + 15)` contains `longitude`.
    ///
    /// # Example
    /// ```
    /// use edo_time::sekki::SolarTerm;
    ///
    /// assert_eq!(SolarTerm::from_longitude(0.0), SolarTerm::VernalEquinox);
    /// assert_eq!(SolarTerm::from_longitude(359.9), SolarTerm::AwakeningOfInsects);
    /// assert_eq!(SolarTerm::from_longitude(-45.0).name(), "立春");
    /// ```
    #[must_use]
    pub fn from_longitude(longitude: f64) -> Self {
        let longitude = normalize_degrees_0_to_360(longitude);
        let index = (longitude / TERM_WIDTH).floor() as usize;
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Position in longitude order, 0 for 春分.
    #[must_use]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Kanji name, e.g. 春分.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        TERM_NAMES[self.index()].0
    }

    /// Kana reading.
    #[must_use]
    pub const fn reading(&self) -> &'static str {
        TERM_NAMES[self.index()].1
    }

    /// English name.
    #[must_use]
    pub const fn english(&self) -> &'static str {
        TERM_NAMES[self.index()].2
    }

    /// Solar longitude at which the term begins.
    #[must_use]
    pub fn start_longitude(&self) -> f64 {
        self.index() as f64 * TERM_WIDTH
    }

    /// Whether `longitude` lies in this term's band, with wraparound at 360°.
    #[must_use]
    pub fn contains(&self, longitude: f64) -> bool {
        let offset = (longitude - self.start_longitude()).rem_euclid(360.0);
        offset < TERM_WIDTH
    }

    /// The term that follows this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % 24]
    }

    /// The three micro-seasons of this term, in order.
    #[must_use]
    pub fn micro_seasons(&self) -> [MicroSeason; 3] {
        let first = (self.index() + 24 - Self::StartOfSpring.index()) % 24 * 3;
        core::array::from_fn(|i| MicroSeason { index: first + i })
    }
}

/// Position of a micro-season within its term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubBand {
    /// 初候
    First,
    /// 次候
    Second,
    /// 末候
    Last,
}

impl SubBand {
    /// Japanese label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::First => "初候",
            Self::Second => "次候",
            Self::Last => "末候",
        }
    }
}

/// (kanji, reading), starting at 立春.
const MICRO_SEASONS: [(&str, &str); 72] = [
    ("東風解凍", "はるかぜこおりをとく"),
    ("黄鶯睍睆", "うぐいすなく"),
    ("魚上氷", "うおこおりをいずる"),
    ("土脉潤起", "つちのしょううるおいおこる"),
    ("霞始靆", "かすみはじめてたなびく"),
    ("草木萌動", "そうもくめばえいずる"),
    ("蟄虫啓戸", "すごもりむしとをひらく"),
    ("桃始笑", "ももはじめてさく"),
    ("菜虫化蝶", "なむしちょうとなる"),
    ("雀始巣", "すずめはじめてすくう"),
    ("桜始開", "さくらはじめてひらく"),
    ("雷乃発声", "かみなりすなわちこえをはっす"),
    ("玄鳥至", "つばめきたる"),
    ("鴻雁北", "こうがんかえる"),
    ("虹始見", "にじはじめてあらわる"),
    ("葭始生", "あしはじめてしょうず"),
    ("霜止出苗", "しもやみてなえいずる"),
    ("牡丹華", "ぼたんはなさく"),
    ("蛙始鳴", "かわずはじめてなく"),
    ("蚯蚓出", "みみずいずる"),
    ("竹笋生", "たけのこしょうず"),
    ("蚕起食桑", "かいこおきてくわをはむ"),
    ("紅花栄", "べにばなさかう"),
    ("麦秋至", "むぎのときいたる"),
    ("蟷螂生", "かまきりしょうず"),
    ("腐草為螢", "くされたるくさほたるとなる"),
    ("梅子黄", "うめのみきばむ"),
    ("乃東枯", "なつかれくさかるる"),
    ("菖蒲華", "あやめはなさく"),
    ("半夏生", "はんげしょうず"),
    ("温風至", "あつかぜいたる"),
    ("蓮始開", "はすはじめてひらく"),
    ("鷹乃学習", "たかすなわちわざをならう"),
    ("桐始結花", "きりはじめてはなをむすぶ"),
    ("土潤溽暑", "つちうるおうてむしあつし"),
    ("大雨時行", "たいうときどきふる"),
    ("涼風至", "すずかぜいたる"),
    ("寒蝉鳴", "ひぐらしなく"),
    ("蒙霧升降", "ふかききりまとう"),
    ("綿柎開", "わたのはなしべひらく"),
    ("天地始粛", "てんちはじめてさむし"),
    ("禾乃登", "こくものすなわちみのる"),
    ("草露白", "くさのつゆしろし"),
    ("鶺鴒鳴", "せきれいなく"),
    ("玄鳥去", "つばめさる"),
    ("雷乃収声", "かみなりすなわちこえをおさむ"),
    ("蟄虫坏戸", "むしかくれてとをふさぐ"),
    ("水始涸", "みずはじめてかるる"),
    ("鴻雁来", "こうがんきたる"),
    ("菊花開", "きくのはなひらく"),
    ("蟋蟀在戸", "きりぎりすとにあり"),
    ("霜始降", "しもはじめてふる"),
    ("霎時施", "こさめときどきふる"),
    ("楓蔦黄", "もみじつたきばむ"),
    ("山茶始開", "つばきはじめてひらく"),
    ("地始凍", "ちはじめてこおる"),
    ("金盞香", "きんせんかさく"),
    ("虹蔵不見", "にじかくれてみえず"),
    ("朔風払葉", "きたかぜこのはをはらう"),
    ("橘始黄", "たちばなはじめてきばむ"),
    ("閉塞成冬", "そらさむくふゆとなる"),
    ("熊蟄穴", "くまあなにこもる"),
    ("鱖魚群", "さけのうおむらがる"),
    ("乃東生", "なつかれくさしょうず"),
    ("麋角解", "さわしかのつのおつる"),
    ("雪下出麦", "ゆきわたりてむぎのびる"),
    ("芹乃栄", "せりすなわちさかう"),
    ("水泉動", "しみずあたたかをふくむ"),
    ("雉始雊", "きじはじめてなく"),
    ("款冬華", "ふきのはなさく"),
    ("水沢腹堅", "さわみずこおりつめる"),
    ("鶏始乳", "にわとりはじめてとやにつく"),
];

/// One of the 72 micro-seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MicroSeason {
    /// 0-based index in the traditional sequence, 0 for 東風解凍
    index: usize,
}

impl MicroSeason {
    /// Finds the micro-season whose 5° band contains `longitude`.
    ///
    /// # Example
    /// ```
    /// use edo_time::sekki::MicroSeason;
    ///
    /// let kou = MicroSeason::from_longitude(0.0);
    /// assert_eq!(kou.name(), "雀始巣");
    /// assert_eq!(kou.ordinal(), 10);
    /// ```
    #[must_use]
    pub fn from_longitude(longitude: f64) -> Self {
        let offset = normalize_degrees_0_to_360(longitude - SEQUENCE_ORIGIN);
        let index = (offset / MICRO_SEASON_WIDTH).floor() as usize % MICRO_SEASONS.len();
        Self { index }
    }

    /// Creates a micro-season from its 1-based ordinal (1 = 東風解凍).
    #[must_use]
    pub const fn from_ordinal(ordinal: usize) -> Option<Self> {
        if ordinal >= 1 && ordinal <= MICRO_SEASONS.len() {
            Some(Self { index: ordinal - 1 })
        } else {
            None
        }
    }

    /// 1-based ordinal in the traditional sequence.
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        self.index + 1
    }

    /// Kanji name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        MICRO_SEASONS[self.index].0
    }

    /// Kana reading.
    #[must_use]
    pub const fn reading(&self) -> &'static str {
        MICRO_SEASONS[self.index].1
    }

    /// The solar term this micro-season belongs to.
    #[must_use]
    pub const fn term(&self) -> SolarTerm {
        SolarTerm::ALL[(self.index / 3 + SolarTerm::StartOfSpring.index()) % 24]
    }

    /// Position within the owning term.
    #[must_use]
    pub const fn sub_band(&self) -> SubBand {
        match self.index % 3 {
            0 => SubBand::First,
            1 => SubBand::Second,
            _ => SubBand::Last,
        }
    }

    /// Solar longitude at which the micro-season begins.
    #[must_use]
    pub fn start_longitude(&self) -> f64 {
        normalize_degrees_0_to_360(SEQUENCE_ORIGIN + self.index as f64 * MICRO_SEASON_WIDTH)
    }
}

impl Serialize for SolarTerm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SolarTerm", 4)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("reading", self.reading())?;
        state.serialize_field("english", self.english())?;
        state.serialize_field("start_longitude", &self.start_longitude())?;
        state.end()
    }
}

impl Serialize for MicroSeason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MicroSeason", 5)?;
        state.serialize_field("ordinal", &self.ordinal())?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("reading", self.reading())?;
        state.serialize_field("sub_band", &self.sub_band())?;
        state.serialize_field("start_longitude", &self.start_longitude())?;
        state.end()
    }
}

/// Seasonal classification of one solar longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sekki {
    /// Solar longitude in degrees, [0, 360)
    pub solar_longitude: f64,
    /// Current solar term
    pub term: SolarTerm,
    /// Current micro-season
    pub micro_season: MicroSeason,
}

/// Classifies a solar longitude into its solar term and micro-season.
#[must_use]
pub fn classify(longitude: f64) -> Sekki {
    let solar_longitude = normalize_degrees_0_to_360(longitude);
    Sekki {
        solar_longitude,
        term: SolarTerm::from_longitude(solar_longitude),
        micro_season: MicroSeason::from_longitude(solar_longitude),
    }
}
