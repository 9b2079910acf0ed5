// 🔭 Birth Chart Calculator - pure date → label derivations
//
// Four independent values from one calendar date:
// 1. Numerology life path number (digit-sum reduction, master numbers kept)
// 2. Western zodiac sign (month/day ranges)
// 3. Chinese zodiac animal (12-year cycle anchored at 1900 = Rat)
// 4. Nakshatra (day-of-year approximation, NOT a lunar longitude)

use crate::error::{NamvedaError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// BIRTH DATE
// ============================================================================

/// Birth data as entered by the user.
///
/// Only the calendar date feeds the calculator. Time and place are
/// carried through to the AI prompt as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthDate {
    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

impl BirthDate {
    /// Build from year/month/day, rejecting impossible dates
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            NamvedaError::validation(format!(
                "invalid birth date: {:04}-{:02}-{:02}",
                year, month, day
            ))
        })?;
        Ok(BirthDate::from(date))
    }

    /// Parse an ISO `YYYY-MM-DD` string
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(NamvedaError::validation("birth date is required"));
        }

        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| {
            NamvedaError::validation(format!("invalid birth date '{}': {}", trimmed, e))
        })?;
        Ok(BirthDate::from(date))
    }

    /// Builder pattern: add time of birth
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = non_blank(time.into());
        self
    }

    /// Builder pattern: add place of birth
    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = non_blank(place.into());
        self
    }
}

impl From<NaiveDate> for BirthDate {
    fn from(date: NaiveDate) -> Self {
        BirthDate {
            date,
            time: None,
            place: None,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ============================================================================
// NUMEROLOGY
// ============================================================================

/// Master numbers are never reduced further
pub const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumerologyResult {
    /// One of 1..=9, 11, 22, 33
    pub life_path_number: u32,
    pub meaning: String,
}

/// Sum of the decimal digits of `n`
pub fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Reduce a digit sum to a single digit or a master number.
///
/// The master-number check runs on every pass, so 38 → 11 stops at 11.
pub fn reduce_to_life_path(mut sum: u32) -> u32 {
    while sum > 9 && !MASTER_NUMBERS.contains(&sum) {
        sum = digit_sum(sum);
    }
    sum
}

/// Meaning of a life path number. Unknown keys get "Unique path".
pub fn numerology_meaning(number: u32) -> &'static str {
    match number {
        1 => "Leadership, independence, pioneering spirit",
        2 => "Cooperation, harmony, diplomacy",
        3 => "Creativity, communication, optimism",
        4 => "Stability, hard work, practicality",
        5 => "Freedom, adventure, versatility",
        6 => "Nurturing, responsibility, healing",
        7 => "Spirituality, introspection, wisdom",
        8 => "Material success, authority, achievement",
        9 => "Humanitarian, compassion, completion",
        11 => "Intuition, inspiration, enlightenment",
        22 => "Master builder, practical idealism",
        33 => "Master teacher, spiritual guidance",
        _ => "Unique path",
    }
}

/// Life path number from the YYYYMMDD digits of a date
pub fn calculate_numerology(date: NaiveDate) -> NumerologyResult {
    let digits = format!("{:04}{:02}{:02}", date.year(), date.month(), date.day());
    let sum: u32 = digits.chars().filter_map(|c| c.to_digit(10)).sum();
    let life_path_number = reduce_to_life_path(sum);

    NumerologyResult {
        life_path_number,
        meaning: numerology_meaning(life_path_number).to_string(),
    }
}

// ============================================================================
// WESTERN ZODIAC
// ============================================================================

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    /// Sign for a month (1-12) and day (1-31).
    ///
    /// Ranges are inclusive and checked in order; Feb 19 - Mar 20 falls
    /// through to Pisces.
    pub fn from_month_day(month: u32, day: u32) -> Self {
        match (month, day) {
            (3, 21..=31) | (4, 1..=19) => ZodiacSign::Aries,
            (4, 20..=31) | (5, 1..=20) => ZodiacSign::Taurus,
            (5, 21..=31) | (6, 1..=20) => ZodiacSign::Gemini,
            (6, 21..=31) | (7, 1..=22) => ZodiacSign::Cancer,
            (7, 23..=31) | (8, 1..=22) => ZodiacSign::Leo,
            (8, 23..=31) | (9, 1..=22) => ZodiacSign::Virgo,
            (9, 23..=31) | (10, 1..=22) => ZodiacSign::Libra,
            (10, 23..=31) | (11, 1..=21) => ZodiacSign::Scorpio,
            (11, 22..=31) | (12, 1..=21) => ZodiacSign::Sagittarius,
            (12, 22..=31) | (1, 1..=19) => ZodiacSign::Capricorn,
            (1, 20..=31) | (2, 1..=18) => ZodiacSign::Aquarius,
            _ => ZodiacSign::Pisces,
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn calculate_zodiac_sign(date: NaiveDate) -> ZodiacSign {
    ZodiacSign::from_month_day(date.month(), date.day())
}

// ============================================================================
// CHINESE ZODIAC
// ============================================================================

/// First year of the cycle used as the anchor (a Rat year)
pub const CHINESE_ZODIAC_EPOCH: i32 = 1900;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChineseZodiac {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

impl ChineseZodiac {
    pub const CYCLE: [ChineseZodiac; 12] = [
        ChineseZodiac::Rat,
        ChineseZodiac::Ox,
        ChineseZodiac::Tiger,
        ChineseZodiac::Rabbit,
        ChineseZodiac::Dragon,
        ChineseZodiac::Snake,
        ChineseZodiac::Horse,
        ChineseZodiac::Goat,
        ChineseZodiac::Monkey,
        ChineseZodiac::Rooster,
        ChineseZodiac::Dog,
        ChineseZodiac::Pig,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChineseZodiac::Rat => "Rat",
            ChineseZodiac::Ox => "Ox",
            ChineseZodiac::Tiger => "Tiger",
            ChineseZodiac::Rabbit => "Rabbit",
            ChineseZodiac::Dragon => "Dragon",
            ChineseZodiac::Snake => "Snake",
            ChineseZodiac::Horse => "Horse",
            ChineseZodiac::Goat => "Goat",
            ChineseZodiac::Monkey => "Monkey",
            ChineseZodiac::Rooster => "Rooster",
            ChineseZodiac::Dog => "Dog",
            ChineseZodiac::Pig => "Pig",
        }
    }

    /// Animal for a Gregorian year. Floor modulo keeps pre-1900 years in range.
    pub fn from_year(year: i32) -> Self {
        let index = (year - CHINESE_ZODIAC_EPOCH).rem_euclid(12) as usize;
        Self::CYCLE[index]
    }
}

impl fmt::Display for ChineseZodiac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn calculate_chinese_zodiac(date: NaiveDate) -> ChineseZodiac {
    ChineseZodiac::from_year(date.year())
}

// ============================================================================
// NAKSHATRA (APPROXIMATE)
// ============================================================================

/// The 27 lunar mansions in traditional order.
///
/// Selected here by calendar position, not by the Moon's sidereal
/// longitude, so the result is only an approximation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    #[serde(rename = "Purva Phalguni")]
    PurvaPhalguni,
    #[serde(rename = "Uttara Phalguni")]
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    #[serde(rename = "Purva Ashadha")]
    PurvaAshadha,
    #[serde(rename = "Uttara Ashadha")]
    UttaraAshadha,
    Shravana,
    Dhanishta,
    Shatabhisha,
    #[serde(rename = "Purva Bhadrapada")]
    PurvaBhadrapada,
    #[serde(rename = "Uttara Bhadrapada")]
    UttaraBhadrapada,
    Revati,
}

impl Nakshatra {
    pub const ALL: [Nakshatra; 27] = [
        Nakshatra::Ashwini,
        Nakshatra::Bharani,
        Nakshatra::Krittika,
        Nakshatra::Rohini,
        Nakshatra::Mrigashira,
        Nakshatra::Ardra,
        Nakshatra::Punarvasu,
        Nakshatra::Pushya,
        Nakshatra::Ashlesha,
        Nakshatra::Magha,
        Nakshatra::PurvaPhalguni,
        Nakshatra::UttaraPhalguni,
        Nakshatra::Hasta,
        Nakshatra::Chitra,
        Nakshatra::Swati,
        Nakshatra::Vishakha,
        Nakshatra::Anuradha,
        Nakshatra::Jyeshtha,
        Nakshatra::Mula,
        Nakshatra::PurvaAshadha,
        Nakshatra::UttaraAshadha,
        Nakshatra::Shravana,
        Nakshatra::Dhanishta,
        Nakshatra::Shatabhisha,
        Nakshatra::PurvaBhadrapada,
        Nakshatra::UttaraBhadrapada,
        Nakshatra::Revati,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Nakshatra::Ashwini => "Ashwini",
            Nakshatra::Bharani => "Bharani",
            Nakshatra::Krittika => "Krittika",
            Nakshatra::Rohini => "Rohini",
            Nakshatra::Mrigashira => "Mrigashira",
            Nakshatra::Ardra => "Ardra",
            Nakshatra::Punarvasu => "Punarvasu",
            Nakshatra::Pushya => "Pushya",
            Nakshatra::Ashlesha => "Ashlesha",
            Nakshatra::Magha => "Magha",
            Nakshatra::PurvaPhalguni => "Purva Phalguni",
            Nakshatra::UttaraPhalguni => "Uttara Phalguni",
            Nakshatra::Hasta => "Hasta",
            Nakshatra::Chitra => "Chitra",
            Nakshatra::Swati => "Swati",
            Nakshatra::Vishakha => "Vishakha",
            Nakshatra::Anuradha => "Anuradha",
            Nakshatra::Jyeshtha => "Jyeshtha",
            Nakshatra::Mula => "Mula",
            Nakshatra::PurvaAshadha => "Purva Ashadha",
            Nakshatra::UttaraAshadha => "Uttara Ashadha",
            Nakshatra::Shravana => "Shravana",
            Nakshatra::Dhanishta => "Dhanishta",
            Nakshatra::Shatabhisha => "Shatabhisha",
            Nakshatra::PurvaBhadrapada => "Purva Bhadrapada",
            Nakshatra::UttaraBhadrapada => "Uttara Bhadrapada",
            Nakshatra::Revati => "Revati",
        }
    }

    /// Index into [`Nakshatra::ALL`] for an ordinal day of year (1-366)
    pub fn index_for_day_of_year(day_of_year: u32) -> usize {
        ((day_of_year * 27 / 365) % 27) as usize
    }

    pub fn from_day_of_year(day_of_year: u32) -> Self {
        Self::ALL[Self::index_for_day_of_year(day_of_year)]
    }
}

impl fmt::Display for Nakshatra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn calculate_nakshatra(date: NaiveDate) -> Nakshatra {
    Nakshatra::from_day_of_year(date.ordinal())
}

// ============================================================================
// BIRTH CHART
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthChart {
    pub life_path_number: u32,
    pub life_path_meaning: String,
    pub zodiac_sign: ZodiacSign,
    pub chinese_zodiac_animal: ChineseZodiac,
    /// Day-of-year approximation
    pub nakshatra: Nakshatra,
}

/// Derive all four chart values for a date. Pure and idempotent.
pub fn compute_birth_chart(date: NaiveDate) -> BirthChart {
    let numerology = calculate_numerology(date);

    BirthChart {
        life_path_number: numerology.life_path_number,
        life_path_meaning: numerology.meaning,
        zodiac_sign: calculate_zodiac_sign(date),
        chinese_zodiac_animal: calculate_chinese_zodiac(date),
        nakshatra: calculate_nakshatra(date),
    }
}

// ============================================================================
// TESTS
// ============================================================================
