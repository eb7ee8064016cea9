//! ISO 3166-1 numeric country code → continent name

use crate::constants::UNKNOWN_CONTINENT;

/// Continent for a numeric country code; absent or unknown codes give "Unknown"
pub fn country_to_continent(country: Option<i64>) -> &'static str {
    let Some(code) = country else {
        return UNKNOWN_CONTINENT;
    };

    match code {
        12 | 24 | 72 | 108 | 120 | 132 | 140 | 148 | 174 | 175 | 178 | 180 | 204 | 226 | 231
        | 232 | 262 | 266 | 270 | 288 | 324 | 384 | 404 | 426 | 430 | 434 | 450 | 454 | 466
        | 478 | 480 | 504 | 508 | 516 | 562 | 566 | 624 | 638 | 646 | 654 | 678 | 686 | 690
        | 694 | 706 | 710 | 716 | 728 | 729 | 732 | 748 | 768 | 788 | 800 | 818 | 834 | 854
        | 894 => "Africa",

        10 => "Antarctica",

        4 | 31 | 48 | 50 | 51 | 64 | 86 | 96 | 104 | 116 | 144 | 156 | 158 | 162 | 166 | 196
        | 268 | 275 | 344 | 356 | 360 | 364 | 368 | 376 | 392 | 398 | 400 | 408 | 410 | 414
        | 417 | 418 | 422 | 446 | 458 | 462 | 496 | 512 | 524 | 586 | 608 | 626 | 634 | 682
        | 702 | 704 | 760 | 762 | 764 | 784 | 792 | 795 | 860 | 887 => "Asia",

        8 | 20 | 40 | 56 | 70 | 100 | 112 | 191 | 203 | 208 | 233 | 234 | 246 | 248 | 250
        | 276 | 292 | 300 | 336 | 348 | 352 | 372 | 380 | 428 | 438 | 440 | 442 | 470 | 492
        | 498 | 499 | 528 | 578 | 616 | 620 | 642 | 643 | 674 | 688 | 703 | 705 | 724 | 744
        | 752 | 756 | 804 | 807 | 826 | 831 | 832 | 833 => "Europe",

        28 | 44 | 52 | 60 | 84 | 92 | 124 | 136 | 188 | 192 | 212 | 214 | 222 | 304 | 308
        | 312 | 320 | 332 | 340 | 388 | 474 | 484 | 500 | 531 | 533 | 534 | 535 | 558 | 591
        | 630 | 652 | 659 | 660 | 662 | 663 | 666 | 670 | 780 | 796 | 840 | 850 => {
            "North America"
        }

        32 | 68 | 76 | 152 | 170 | 218 | 238 | 254 | 328 | 600 | 604 | 740 | 858 | 862 => {
            "South America"
        }

        16 | 36 | 90 | 184 | 242 | 258 | 296 | 316 | 520 | 540 | 548 | 554 | 570 | 574 | 580
        | 581 | 583 | 584 | 585 | 598 | 612 | 772 | 776 | 798 | 876 | 882 => "Oceania",

        _ => UNKNOWN_CONTINENT,
    }
}
